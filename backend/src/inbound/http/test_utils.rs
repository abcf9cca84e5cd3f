//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::configure_api;
use super::state::HttpState;
use crate::middleware::{SessionGate, Trace};
use crate::outbound::crypto::BcryptPasswordHasher;
use crate::outbound::memory::InMemoryStore;

/// Lowest bcrypt cost, to keep handler tests fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over a fresh in-memory store and a cheap bcrypt hasher.
///
/// The store is returned too so tests can inspect or mutate persisted rows.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::from_adapters(
        store.clone(),
        store.clone(),
        Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST)),
    );
    (state, store)
}

/// Full API app as served in production, minus health and docs.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).wrap(Trace).service(
        web::scope("")
            .wrap(SessionGate)
            .wrap(test_session_middleware())
            .configure(configure_api),
    )
}

/// Extract the session cookie set by a response, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
