//! Driving port for account creation.
//!
//! Inbound adapters call this port with already-validated
//! [`SignupDetails`]; hashing and persistence stay behind it.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Domain use-case port for registering a new user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Hash the password, store the account, and return its public profile.
    async fn signup(&self, details: SignupDetails) -> Result<User, Error>;
}
