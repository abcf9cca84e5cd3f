//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the account, recipe and health endpoints together
//! with their request and response schemas. It backs Swagger UI in debug
//! builds and the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ErrorCode, Recipe, User};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::recipes::CreateRecipeRequest;
use crate::inbound::http::users::{LoginRequest, SignupRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /signup and POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe API",
        description = "Session-authenticated accounts and personal recipes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::check_session,
        crate::inbound::http::users::logout,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Recipe,
        ErrorResponse,
        ErrorCode,
        SignupRequest,
        LoginRequest,
        CreateRecipeRequest
    )),
    tags(
        (name = "users", description = "Signup, login and session management"),
        (name = "recipes", description = "Recipes owned by the logged-in user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
