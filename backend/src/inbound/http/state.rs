//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, PasswordHasher, RecipeRepository, RecipesCommand, RecipesQuery, SignupService,
    UserProfileQuery, UserRepository,
};
use crate::domain::{AccountService, RecipeService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub recipes: Arc<dyn RecipesQuery>,
    pub recipes_command: Arc<dyn RecipesCommand>,
}

impl HttpState {
    /// Wire the domain services over the given driven adapters.
    ///
    /// One [`AccountService`] backs every account port and one
    /// [`RecipeService`] backs both recipe ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_backend::inbound::http::state::HttpState;
    /// use recipe_backend::outbound::crypto::BcryptPasswordHasher;
    /// use recipe_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_adapters(
    ///     store.clone(),
    ///     store,
    ///     Arc::new(BcryptPasswordHasher::new(4)),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn from_adapters<U, R, H>(users: Arc<U>, recipes: Arc<R>, hasher: Arc<H>) -> Self
    where
        U: UserRepository + 'static,
        R: RecipeRepository + 'static,
        H: PasswordHasher + 'static,
    {
        let accounts = Arc::new(AccountService::new(users, hasher));
        let recipe_service = Arc::new(RecipeService::new(recipes));
        Self {
            signup: accounts.clone(),
            login: accounts.clone(),
            profile: accounts,
            recipes: recipe_service.clone(),
            recipes_command: recipe_service,
        }
    }
}
