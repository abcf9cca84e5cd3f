//! Helpers shared by the backend integration suites.
//!
//! Each file under `backend/tests/` compiles as its own crate, so suites pull
//! these in with `mod support;`.

pub mod embedded_postgres;

pub use embedded_postgres::{ProvisionedDatabase, provision_database};

/// Returns true when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Applies the database setup failure policy.
///
/// With `SKIP_TEST_CLUSTER` set the test prints a marker and is skipped;
/// otherwise it fails so a broken environment is never reported as a pass.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test database setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
