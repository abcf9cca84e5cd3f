//! Driven port for one-way password hashing.
//!
//! Hashing is salted and deliberately slow. Adapters are expected to keep
//! that cost off the async executor.

use async_trait::async_trait;

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password digest.
    pub enum CredentialError {
        /// The hashing primitive rejected the input or failed internally.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The worker running the hash could not complete.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest for `password`.
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError>;

    /// Check `password` against a stored digest.
    ///
    /// Never fails: malformed digests and mismatches both yield `false`.
    async fn verify(&self, password: &Password, digest: &PasswordDigest) -> bool;
}
