//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username uniqueness comes from the `users_username_key` constraint; the
//! adapter maps the resulting unique violation to
//! [`UserPersistenceError::UsernameTaken`] instead of checking first.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserCredentials, UserId, Username};

use super::diesel_error_mapping::{StorageFailure, classify_diesel_error};
use super::models::{NewUserRow, UserCredentialsRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error, username: &str) -> UserPersistenceError {
    match classify_diesel_error(error) {
        StorageFailure::Unique => UserPersistenceError::username_taken(username),
        StorageFailure::Constraint(name) => UserPersistenceError::constraint(name),
        StorageFailure::Connection => {
            UserPersistenceError::connection("database connection error")
        }
        StorageFailure::ForeignKey | StorageFailure::Query => {
            UserPersistenceError::query("database error")
        }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored username failed validation");
        UserPersistenceError::query(format!("invalid stored username: {err}"))
    })?;
    Ok(User::new(UserId::from_uuid(row.id), username)
        .with_image_url(row.image_url)
        .with_bio(row.bio))
}

fn row_to_credentials(row: UserCredentialsRow) -> Result<UserCredentials, UserPersistenceError> {
    let digest = PasswordDigest::new(row.password_digest)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored digest: {err}")))?;
    Ok(UserCredentials::new(row_to_user(row.user)?, digest))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        user: &User,
        digest: &PasswordDigest,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let username = user.username().as_ref();

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username,
            password_digest: digest.as_stored_str(),
            image_url: user.image_url(),
            bio: user.bio(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, username))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, ""))?;

        row.map(row_to_user).transpose()
    }

    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserCredentialsRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, username.as_ref()))?;

        row.map(row_to_credentials).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ""))?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; queries are exercised in `tests/`.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(username: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            image_url: None,
            bio: Some("Ham enthusiast".to_owned()),
        }
    }

    #[rstest]
    fn converts_profile_rows() {
        let source = row("ChefHam");
        let id = source.id;
        let user = row_to_user(source).expect("valid row");
        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.username().as_ref(), "ChefHam");
        assert_eq!(user.bio(), Some("Ham enthusiast"));
    }

    #[rstest]
    fn blank_stored_username_is_a_query_error() {
        let err = row_to_user(row(" ")).expect_err("blank username");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn blank_stored_digest_is_a_query_error() {
        let credentials = UserCredentialsRow {
            user: row("ChefHam"),
            password_digest: String::new(),
        };
        let err = row_to_credentials(credentials).expect_err("blank digest");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }
}
