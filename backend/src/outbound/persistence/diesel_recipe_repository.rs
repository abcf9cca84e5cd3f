//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{Recipe, RecipeId, UserId};

use super::diesel_error_mapping::{StorageFailure, classify_diesel_error};
use super::models::{NewRecipeRow, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the [`RecipeRepository`] port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    RecipePersistenceError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error, owner: &UserId) -> RecipePersistenceError {
    match classify_diesel_error(error) {
        StorageFailure::ForeignKey => RecipePersistenceError::owner_missing(owner.as_ref()),
        StorageFailure::Constraint(name) => RecipePersistenceError::constraint(name),
        StorageFailure::Connection => {
            RecipePersistenceError::connection("database connection error")
        }
        StorageFailure::Unique | StorageFailure::Query => {
            RecipePersistenceError::query("database error")
        }
    }
}

fn row_to_recipe(row: RecipeRow) -> Recipe {
    Recipe::restore(
        RecipeId::from_uuid(row.id),
        UserId::from_uuid(row.owner_id),
        row.title,
        row.instructions,
        row.minutes_to_complete,
    )
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRecipeRow {
            id: *recipe.id().as_uuid(),
            owner_id: *recipe.owner().as_uuid(),
            title: recipe.title(),
            instructions: recipe.instructions(),
            minutes_to_complete: recipe.minutes_to_complete(),
        };

        diesel::insert_into(recipes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, recipe.owner()))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::owner_id.eq(*owner.as_uuid()))
            .order((recipes::created_at.asc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, owner))?;

        Ok(rows.into_iter().map(row_to_recipe).collect())
    }
}
