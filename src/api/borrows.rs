//! Borrow and return endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        borrow::{CreateBorrow, ReturnBorrow},
        Borrow,
    },
};

use super::{AuthenticatedUser, IdPath, ValidatedJson};

/// List borrows
#[utoipa::path(
    get,
    path = "/api/borrows",
    tag = "borrows",
    security(("x_auth" = [])),
    responses(
        (status = 200, description = "All borrows, most recent first", body = Vec<Borrow>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_borrows(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.borrows.list().await?;
    Ok(Json(borrows))
}

/// Get borrow by ID
#[utoipa::path(
    get,
    path = "/api/borrows/{id}",
    tag = "borrows",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Borrow ID")),
    responses(
        (status = 200, description = "Borrow", body = Borrow),
        (status = 404, description = "Borrow not found")
    )
)]
pub async fn get_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<Json<Borrow>> {
    let borrow = state.services.borrows.get_by_id(&id).await?;
    Ok(Json(borrow))
}

/// Lend a book to a borrower
#[utoipa::path(
    post,
    path = "/api/borrows",
    tag = "borrows",
    security(("x_auth" = [])),
    request_body = CreateBorrow,
    responses(
        (status = 200, description = "Borrow recorded, stock decremented", body = Borrow),
        (status = 400, description = "Invalid borrower, invalid book or book not in stock", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateBorrow>,
) -> AppResult<Json<Borrow>> {
    let borrow = state
        .services
        .borrows
        .create_borrow(&request.borrower_id, &request.book_id)
        .await?;
    Ok(Json(borrow))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/api/returns",
    tag = "borrows",
    security(("x_auth" = [])),
    request_body = ReturnBorrow,
    responses(
        (status = 200, description = "Borrow closed with its penalty fee", body = Borrow),
        (status = 400, description = "Return already processed", body = crate::error::ErrorResponse),
        (status = 404, description = "Borrow not found")
    )
)]
pub async fn return_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ReturnBorrow>,
) -> AppResult<Json<Borrow>> {
    let borrow = state.services.borrows.return_borrow(&request.borrow_id).await?;
    Ok(Json(borrow))
}
