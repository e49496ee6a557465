// Tag and ingredient handlers
// Generic over the label kind; routes pick the kind with a turbofish

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::state::{AppState, LabelStore};
use crate::domain::recipe::label::validate_name;
use crate::domain::recipe::Label;
use crate::domain::repositories::LabelRepository;

/// Request body for replacing a label
#[derive(Debug, Deserialize)]
pub struct LabelRequest {
    pub name: String,
}

/// Request body for a partial update
#[derive(Debug, Deserialize)]
pub struct LabelPatchRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LabelResponse {
    pub id: i64,
    pub name: String,
}

impl LabelResponse {
    fn from_label<L: Label>(label: &L) -> Self {
        Self {
            id: label.id(),
            name: label.name().to_string(),
        }
    }
}

/// List the caller's labels, by name descending
///
/// GET /api/recipe/tags/, GET /api/recipe/ingredients/
pub async fn list_labels<L: Label>(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<LabelResponse>>, ApiError>
where
    AppState: LabelStore<L>,
{
    let repo = <AppState as LabelStore<L>>::labels(&state);
    let labels = repo.list(auth.id).await?;

    Ok(Json(labels.iter().map(LabelResponse::from_label).collect()))
}

/// Rename a label
///
/// PUT /api/recipe/tags/:id/, PUT /api/recipe/ingredients/:id/
pub async fn replace_label<L: Label>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<LabelRequest>,
) -> Result<Json<LabelResponse>, ApiError>
where
    AppState: LabelStore<L>,
{
    validate_name(&req.name)?;

    let repo = <AppState as LabelStore<L>>::labels(&state);
    let label = repo.update(auth.id, id, Some(req.name)).await?;

    Ok(Json(LabelResponse::from_label(&label)))
}

/// Partially update a label
///
/// PATCH /api/recipe/tags/:id/, PATCH /api/recipe/ingredients/:id/
pub async fn update_label<L: Label>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<LabelPatchRequest>,
) -> Result<Json<LabelResponse>, ApiError>
where
    AppState: LabelStore<L>,
{
    if let Some(name) = &req.name {
        validate_name(name)?;
    }

    let repo = <AppState as LabelStore<L>>::labels(&state);
    let label = repo.update(auth.id, id, req.name).await?;

    Ok(Json(LabelResponse::from_label(&label)))
}

/// Delete a label
///
/// DELETE /api/recipe/tags/:id/, DELETE /api/recipe/ingredients/:id/
pub async fn delete_label<L: Label>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
    AppState: LabelStore<L>,
{
    let repo = <AppState as LabelStore<L>>::labels(&state);
    repo.delete(auth.id, id).await?;
    tracing::info!(user_id = %auth.id, kind = L::KIND, id, "label deleted");

    Ok(StatusCode::NO_CONTENT)
}
