//! Category endpoints (read-only)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::document::Document, AppState};

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All category records")
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Document>>> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// List category identifiers and names
#[utoipa::path(
    get,
    path = "/categories-name",
    tag = "categories",
    responses(
        (status = 200, description = "`_id` and `name` of every category")
    )
)]
pub async fn list_category_names(State(state): State<AppState>) -> AppResult<Json<Vec<Document>>> {
    let names = state.services.catalog.category_names().await?;
    Ok(Json(names))
}

/// Get a category by name
#[utoipa::path(
    get,
    path = "/category/{name}",
    tag = "categories",
    params(("name" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Category record"),
        (status = 404, description = "No category with that name")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Document>> {
    let category = state.services.catalog.get_category(&name).await?;
    Ok(Json(category))
}
