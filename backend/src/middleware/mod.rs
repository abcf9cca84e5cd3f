//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and session enforcement.

pub mod session_gate;
pub mod trace;

pub use session_gate::SessionGate;
pub use trace::Trace;
