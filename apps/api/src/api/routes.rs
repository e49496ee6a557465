use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{labels, recipes, users};
use super::state::AppState;
use crate::domain::recipe::{Ingredient, Tag};

/// Builds the application router
///
/// Tag and ingredient routes expose list, update and delete only.
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(users::health_check))
        // Account routes
        .route("/api/user/create/", post(users::register))
        .route("/api/user/token/", post(users::create_token_for_user))
        .route("/api/user/me/", get(users::me).patch(users::update_me))
        // Recipe routes
        .route(
            "/api/recipe/recipes/",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/api/recipe/recipes/:id/",
            get(recipes::get_recipe)
                .put(recipes::replace_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        // Tag routes
        .route("/api/recipe/tags/", get(labels::list_labels::<Tag>))
        .route(
            "/api/recipe/tags/:id/",
            put(labels::replace_label::<Tag>)
                .patch(labels::update_label::<Tag>)
                .delete(labels::delete_label::<Tag>),
        )
        // Ingredient routes
        .route(
            "/api/recipe/ingredients/",
            get(labels::list_labels::<Ingredient>),
        )
        .route(
            "/api/recipe/ingredients/:id/",
            put(labels::replace_label::<Ingredient>)
                .patch(labels::update_label::<Ingredient>)
                .delete(labels::delete_label::<Ingredient>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
