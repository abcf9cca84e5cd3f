//! In-process storage for development runs and HTTP tests.
//!
//! [`InMemoryStore`] implements both repository ports over one shared state
//! and enforces the same rules as the PostgreSQL schema: unique usernames,
//! non-blank fields, minimum instruction length, owner existence, and
//! cascading deletes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    RecipePersistenceError, RecipeRepository, UserPersistenceError, UserRepository,
};
use crate::domain::validation::{validate_instructions, validate_title};
use crate::domain::{PasswordDigest, Recipe, User, UserCredentials, UserId, Username};

#[derive(Default)]
struct State {
    users: HashMap<UserId, UserCredentials>,
    usernames: HashMap<Username, UserId>,
    recipes: Vec<Recipe>,
}

/// Shared in-memory user and recipe storage.
///
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored recipes across all owners.
    pub async fn recipe_count(&self) -> usize {
        self.state.lock().await.recipes.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(
        &self,
        user: &User,
        digest: &PasswordDigest,
    ) -> Result<(), UserPersistenceError> {
        let mut state = self.state.lock().await;
        if state.usernames.contains_key(user.username()) {
            return Err(UserPersistenceError::username_taken(user.username().as_ref()));
        }
        if state.users.contains_key(user.id()) {
            return Err(UserPersistenceError::query("duplicate user id"));
        }

        state
            .usernames
            .insert(user.username().clone(), user.id().clone());
        state.users.insert(
            user.id().clone(),
            UserCredentials::new(user.clone(), digest.clone()),
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().await;
        Ok(state.users.get(id).map(|stored| stored.user().clone()))
    }

    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let state = self.state.lock().await;
        Ok(state
            .usernames
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.state.lock().await;
        let Some(removed) = state.users.remove(id) else {
            return Ok(false);
        };
        state.usernames.remove(removed.user().username());
        let before = state.recipes.len();
        state.recipes.retain(|recipe| recipe.owner() != id);
        debug!(
            user_id = %id,
            recipes = before - state.recipes.len(),
            "user deleted with owned recipes"
        );
        Ok(true)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        validate_title(recipe.title().to_owned())
            .and_then(|_| validate_instructions(recipe.instructions().to_owned()))
            .map_err(|err| RecipePersistenceError::constraint(err.to_string()))?;

        let mut state = self.state.lock().await;
        if !state.users.contains_key(recipe.owner()) {
            return Err(RecipePersistenceError::owner_missing(recipe.owner().as_ref()));
        }
        state.recipes.push(recipe.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let state = self.state.lock().await;
        Ok(state
            .recipes
            .iter()
            .filter(|recipe| recipe.owner() == owner)
            .cloned()
            .collect())
    }
}
