//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod recipes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register the account and recipe endpoints on a scope.
///
/// The caller wraps the scope with [`crate::middleware::SessionGate`] and the
/// session middleware, and provides [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use recipe_backend::inbound::http::configure_api;
/// use recipe_backend::middleware::SessionGate;
///
/// let _app = App::new().service(web::scope("").wrap(SessionGate).configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(users::signup)
        .service(users::login)
        .service(users::check_session)
        .service(users::logout)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe);
}

#[cfg(test)]
mod tests;
