//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - User / UserCredentials — public profile and its stored digest.
//! - Recipe / RecipeDraft — stored recipe and validated creation input.
//! - AccountService / RecipeService — implementations of the driving ports.

pub mod account_service;
pub mod auth;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError, SignupDetails};
pub use self::credentials::{Password, PasswordDigest, UserCredentials};
pub use self::error::{Error, ErrorCode};
pub use self::recipe::{Recipe, RecipeDraft, RecipeId};
pub use self::recipe_service::RecipeService;
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserIdError, Username};
pub use self::validation::{ValidationError, ValidationErrors};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("log in first"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
