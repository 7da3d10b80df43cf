//! Category endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{category::CategoryInput, Category},
};

use super::{AuthenticatedUser, IdPath, ValidatedJson};

/// List categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories, by name", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Category>> {
    let category = state.services.catalog.get_category(&id).await?;
    Ok(Json(category))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    security(("x_auth" = [])),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category created", body = Category),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> AppResult<Json<Category>> {
    let created = state.services.catalog.create_category(&input.name).await?;
    Ok(Json(created))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> AppResult<Json<Category>> {
    let updated = state.services.catalog.update_category(&id, &input.name).await?;
    Ok(Json(updated))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted category", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<Json<Category>> {
    let deleted = state.services.catalog.delete_category(&id).await?;
    Ok(Json(deleted))
}
