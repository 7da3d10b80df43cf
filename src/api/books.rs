//! Book endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{book::BookInput, Book},
};

use super::{AuthenticatedUser, IdPath, ValidatedJson};

/// List books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, by title", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<crate::AppState>, IdPath(id): IdPath) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    security(("x_auth" = [])),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or unknown category"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(input): ValidatedJson<BookInput>,
) -> AppResult<Json<Book>> {
    let created = state.services.catalog.create_book(input).await?;
    Ok(Json(created))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input or unknown category"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<BookInput>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update_book(&id, input).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    security(("x_auth" = [])),
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Deleted book", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<Json<Book>> {
    let deleted = state.services.catalog.delete_book(&id).await?;
    Ok(Json(deleted))
}
