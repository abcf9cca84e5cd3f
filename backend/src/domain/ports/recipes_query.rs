//! Driving port for reading a user's recipes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, UserId};

/// Domain use-case port for listing recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// List the recipes owned by `owner`, oldest first.
    async fn list_recipes(&self, owner: &UserId) -> Result<Vec<Recipe>, Error>;
}
