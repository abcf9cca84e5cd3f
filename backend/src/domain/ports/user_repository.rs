//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordDigest, User, UserCredentials, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Another account already uses the username.
        UsernameTaken { username: String } => "username {username} is already taken",
        /// A storage constraint rejected the record.
        Constraint { message: String } => "user record violates a constraint: {message}",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for user accounts.
///
/// Username uniqueness is the repository's responsibility: `create` must fail
/// with [`UserPersistenceError::UsernameTaken`] rather than relying on callers
/// to look the name up first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user together with their password digest.
    async fn create(&self, user: &User, digest: &PasswordDigest)
    -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and their digest by username, for login.
    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Remove a user and every recipe they own.
    ///
    /// Returns `false` when no such user existed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
