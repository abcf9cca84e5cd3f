//! Account handlers: signup, login, session check and logout.
//!
//! ```text
//! POST /signup {"username":"ChefHam","password":"secret","image_url":null,"bio":null}
//! POST /login {"username":"ChefHam","password":"secret"}
//! GET /check_session
//! DELETE /logout
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, SignupDetails, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Signup request body for `POST /signup`.
///
/// Missing `username` or `password` are reported as validation failures
/// rather than rejected by the JSON extractor.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "ChefHam")]
    pub username: Option<String>,
    #[schema(example = "Hamtastic1")]
    pub password: Option<String>,
    #[schema(example = "https://example.com/ham.png")]
    pub image_url: Option<String>,
    #[schema(example = "Cooks mostly ham.")]
    pub bio: Option<String>,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = Error;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref(),
            value.password.as_deref(),
            value.image_url,
            value.bio,
        )
        .map_err(Error::from)
    }
}

/// Login request body for `POST /login`.
///
/// Missing or `null` fields are treated as empty and fail like wrong
/// credentials.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ChefHam")]
    pub username: Option<String>,
    #[schema(example = "Hamtastic1")]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Create an account and log it in.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 422, description = "Validation failed or username taken", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignupDetails::try_from(payload.into_inner())?;
    let user = state.signup.signup(details).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate a user and establish a session.
///
/// Blank fields are answered exactly like wrong credentials.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(|err| {
        debug!(reason = %err, "rejected login payload");
        Error::unauthorized(INVALID_CREDENTIALS)
    })?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(user))
}

/// Return the user bound to the current session.
#[utoipa::path(
    get,
    path = "/check_session",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "No session or user no longer exists", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "checkSession"
)]
#[get("/check_session")]
pub async fn check_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(user))
}

/// End the current session.
#[utoipa::path(
    delete,
    path = "/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "No session", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[delete("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = session.clear()?;
    debug!(user_id = %user_id, "user logged out");
    Ok(HttpResponse::NoContent().finish())
}
