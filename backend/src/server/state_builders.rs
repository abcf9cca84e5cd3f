//! Builders wiring HTTP state onto the configured storage backend.

use std::sync::Arc;

use tracing::warn;

use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::crypto::BcryptPasswordHasher;
use recipe_backend::outbound::memory::InMemoryStore;
use recipe_backend::outbound::persistence::{DbPool, DieselRecipeRepository, DieselUserRepository};

use super::ServerConfig;

/// Build handler state from `config`.
///
/// Uses the Diesel repositories when a pool is configured and falls back to
/// a process-local [`InMemoryStore`] otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    match &config.db_pool {
        Some(pool) => diesel_state(pool, hasher),
        None => {
            warn!("no database configured; accounts and recipes live in memory only");
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_adapters(store.clone(), store, hasher)
        }
    }
}

fn diesel_state(pool: &DbPool, hasher: Arc<BcryptPasswordHasher>) -> HttpState {
    HttpState::from_adapters(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselRecipeRepository::new(pool.clone())),
        hasher,
    )
}
