//! Borrower endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{Borrower, BorrowerInput},
};

use super::{AuthenticatedUser, IdPath, ValidatedJson};

/// List borrowers
#[utoipa::path(
    get,
    path = "/api/borrowers",
    tag = "borrowers",
    security(("x_auth" = [])),
    responses(
        (status = 200, description = "All borrowers, by last name", body = Vec<Borrower>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Borrower>>> {
    let borrowers = state.services.borrowers.list().await?;
    Ok(Json(borrowers))
}

/// Get borrower by ID
#[utoipa::path(
    get,
    path = "/api/borrowers/{id}",
    tag = "borrowers",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<Json<Borrower>> {
    let borrower = state.services.borrowers.get_by_id(&id).await?;
    Ok(Json(borrower))
}

/// Register a borrower
#[utoipa::path(
    post,
    path = "/api/borrowers",
    tag = "borrowers",
    security(("x_auth" = [])),
    request_body = BorrowerInput,
    responses(
        (status = 200, description = "Borrower created", body = Borrower),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_borrower(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(input): ValidatedJson<BorrowerInput>,
) -> AppResult<Json<Borrower>> {
    let created = state.services.borrowers.create(&input).await?;
    Ok(Json(created))
}

/// Replace a borrower's details
#[utoipa::path(
    put,
    path = "/api/borrowers/{id}",
    tag = "borrowers",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Borrower ID")),
    request_body = BorrowerInput,
    responses(
        (status = 200, description = "Borrower updated", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn update_borrower(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<BorrowerInput>,
) -> AppResult<Json<Borrower>> {
    let updated = state.services.borrowers.update(&id, &input).await?;
    Ok(Json(updated))
}

/// Delete a borrower
#[utoipa::path(
    delete,
    path = "/api/borrowers/{id}",
    tag = "borrowers",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Deleted borrower", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn delete_borrower(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<Json<Borrower>> {
    let deleted = state.services.borrowers.delete(&id).await?;
    Ok(Json(deleted))
}
