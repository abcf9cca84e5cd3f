//! Driving port for creating recipes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDraft, UserId};

/// Domain use-case port for recipe creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Store `draft` as a new recipe owned by `owner`.
    async fn create_recipe(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error>;
}
