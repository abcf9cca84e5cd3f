//! Recipe handlers scoped to the logged-in user.
//!
//! ```text
//! GET /recipes
//! POST /recipes {"title":"Shed Ham","instructions":"...","minutes_to_complete":60}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Recipe, RecipeDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /recipes`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateRecipeRequest {
    #[schema(example = "Delicious Shed Ham")]
    pub title: Option<String>,
    #[schema(
        example = "Slice the ham, glaze it with honey and roast slowly until the edges caramelise."
    )]
    pub instructions: Option<String>,
    #[schema(example = 60)]
    pub minutes_to_complete: Option<i32>,
}

/// List the current user's recipes, oldest first.
#[utoipa::path(
    get,
    path = "/recipes",
    responses(
        (status = 200, description = "Recipes owned by the current user", body = [Recipe]),
        (status = 401, description = "No session", body = ErrorResponse)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Recipe>>> {
    let owner = session.require_user_id()?;
    let recipes = state.recipes.list_recipes(&owner).await?;
    Ok(web::Json(recipes))
}

/// Create a recipe owned by the current user.
#[utoipa::path(
    post,
    path = "/recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let CreateRecipeRequest {
        title,
        instructions,
        minutes_to_complete,
    } = payload.into_inner();
    let draft = RecipeDraft::try_from_parts(title, instructions, minutes_to_complete)?;
    let recipe = state.recipes_command.create_recipe(&owner, draft).await?;
    Ok(HttpResponse::Created().json(recipe))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
