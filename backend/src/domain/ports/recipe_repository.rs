//! Port for recipe persistence.

use async_trait::async_trait;

use crate::domain::{Recipe, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        /// The owning user does not exist.
        OwnerMissing { owner: String } => "recipe owner {owner} does not exist",
        /// A storage constraint rejected the record.
        Constraint { message: String } => "recipe violates a constraint: {message}",
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Storage for recipes, keyed by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe. The owner must already exist.
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError>;

    /// List recipes belonging to `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError>;
}
