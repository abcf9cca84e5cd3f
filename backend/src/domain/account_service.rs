//! Account domain service.
//!
//! Implements signup, login, and profile lookup on top of the user
//! repository and password hasher ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialError, LoginService, PasswordHasher, SignupService, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{Error, LoginCredentials, SignupDetails, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Account service implementing the user-facing driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::UsernameTaken { .. } => {
                Error::conflict("username is already taken")
                    .with_reasons(vec!["username has already been taken".to_owned()])
            }
            UserPersistenceError::Constraint { message } => Error::invalid_request(
                "user record rejected by storage",
            )
            .with_reasons(vec![message]),
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_credential_error(error: CredentialError) -> Error {
        Error::internal(error.to_string())
    }
}

#[async_trait]
impl<U, H> SignupService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn signup(&self, details: SignupDetails) -> Result<User, Error> {
        let digest = self
            .hasher
            .hash(details.password())
            .await
            .map_err(Self::map_credential_error)?;

        let user = User::new(UserId::random(), details.username().clone())
            .with_image_url(details.image_url().map(str::to_owned))
            .with_bio(details.bio().map(str::to_owned));

        self.users
            .create(&user, &digest)
            .await
            .map_err(Self::map_user_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user signed up");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = credentials.username();
        let Some(stored) = self
            .users
            .find_credentials_by_username(username)
            .await
            .map_err(Self::map_user_error)?
        else {
            debug!(username = %username, "login for unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify(credentials.password(), stored.digest())
            .await
        {
            debug!(user_id = %stored.user().id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let user = stored.into_user();
        info!(user_id = %user.id(), "user logged in");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| {
                debug!(user_id = %user_id, "session refers to a missing user");
                Error::unauthorized("session user no longer exists")
            })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
