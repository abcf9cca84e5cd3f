//! Recipe domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    RecipePersistenceError, RecipeRepository, RecipesCommand, RecipesQuery,
};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, UserId};

/// Recipe service implementing the recipe driving ports.
#[derive(Clone)]
pub struct RecipeService<R> {
    recipes: Arc<R>,
}

impl<R> RecipeService<R> {
    /// Create a new service over the given repository.
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }
}

impl<R> RecipeService<R>
where
    R: RecipeRepository,
{
    fn map_recipe_error(error: RecipePersistenceError) -> Error {
        match error {
            RecipePersistenceError::OwnerMissing { owner } => {
                debug!(user_id = %owner, "recipe owner vanished mid-session");
                Error::unauthorized("session user no longer exists")
            }
            RecipePersistenceError::Constraint { message } => {
                Error::invalid_request("recipe rejected by storage").with_reasons(vec![message])
            }
            RecipePersistenceError::Connection { message } => {
                Error::service_unavailable(format!("recipe repository unavailable: {message}"))
            }
            RecipePersistenceError::Query { message } => {
                Error::internal(format!("recipe repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> RecipesQuery for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn list_recipes(&self, owner: &UserId) -> Result<Vec<Recipe>, Error> {
        self.recipes
            .list_by_owner(owner)
            .await
            .map_err(Self::map_recipe_error)
    }
}

#[async_trait]
impl<R> RecipesCommand for RecipeService<R>
where
    R: RecipeRepository,
{
    async fn create_recipe(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        let recipe = draft.into_recipe(RecipeId::random(), owner.clone());
        self.recipes
            .create(&recipe)
            .await
            .map_err(Self::map_recipe_error)?;
        info!(user_id = %owner, recipe_id = %recipe.id(), "recipe created");
        Ok(recipe)
    }
}
