use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::domain::recipe::{Recipe, RecipeChanges, RecipeDraft};
use crate::domain::repositories::RecipeRepository;

/// Request body for creating or replacing a recipe
///
/// Unknown fields, including any owner field, are ignored.
#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(req: RecipeRequest) -> Self {
        Self {
            title: req.title,
            time_minutes: req.time_minutes,
            price: req.price,
            description: req.description,
        }
    }
}

/// Request body for a partial update
#[derive(Debug, Deserialize)]
pub struct RecipePatchRequest {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

impl From<RecipePatchRequest> for RecipeChanges {
    fn from(req: RecipePatchRequest) -> Self {
        Self {
            title: req.title,
            time_minutes: req.time_minutes,
            price: req.price,
            description: req.description,
        }
    }
}

/// Recipe as shown in lists
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: recipe.price,
        }
    }
}

/// Recipe with every readable field
#[derive(Debug, Serialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub summary: RecipeResponse,
    pub description: String,
    pub image: Option<String>,
}

impl From<&Recipe> for RecipeDetailResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            summary: RecipeResponse::from(recipe),
            description: recipe.description.clone(),
            image: recipe.image.clone(),
        }
    }
}

/// List the caller's recipes, newest first
///
/// GET /api/recipe/recipes/
pub async fn list_recipes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = state.recipes.list(auth.id).await?;

    Ok(Json(recipes.iter().map(RecipeResponse::from).collect()))
}

/// Create a recipe owned by the caller
///
/// POST /api/recipe/recipes/
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetailResponse>), ApiError> {
    let draft = RecipeDraft::from(req);
    draft.validate()?;

    let recipe = state.recipes.create(auth.id, draft).await?;
    tracing::info!(user_id = %auth.id, recipe_id = recipe.id, "recipe created");

    Ok((StatusCode::CREATED, Json(RecipeDetailResponse::from(&recipe))))
}

/// Get one of the caller's recipes
///
/// GET /api/recipe/recipes/:id/
pub async fn get_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let recipe = state
        .recipes
        .find(auth.id, id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(RecipeDetailResponse::from(&recipe)))
}

/// Replace every writable field of a recipe
///
/// PUT /api/recipe/recipes/:id/
pub async fn replace_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<RecipeRequest>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let draft = RecipeDraft::from(req);
    draft.validate()?;

    let recipe = state.recipes.update(auth.id, id, draft.into()).await?;

    Ok(Json(RecipeDetailResponse::from(&recipe)))
}

/// Change some fields of a recipe
///
/// PATCH /api/recipe/recipes/:id/
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<RecipePatchRequest>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let changes = RecipeChanges::from(req);
    changes.validate()?;

    let recipe = state.recipes.update(auth.id, id, changes).await?;

    Ok(Json(RecipeDetailResponse::from(&recipe)))
}

/// Delete a recipe
///
/// DELETE /api/recipe/recipes/:id/
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.recipes.delete(auth.id, id).await?;
    tracing::info!(user_id = %auth.id, recipe_id = id, "recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}
