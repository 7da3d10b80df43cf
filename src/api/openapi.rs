//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrowers, borrows, categories, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Library lending REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth and users
        auth::login,
        users::register,
        users::me,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::get_borrower,
        borrowers::create_borrower,
        borrowers::update_borrower,
        borrowers::delete_borrower,
        // Borrows
        borrows::list_borrows,
        borrows::get_borrow,
        borrows::create_borrow,
        borrows::return_borrow,
    ),
    components(
        schemas(
            crate::models::ObjectId,
            crate::models::User,
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            crate::models::Category,
            crate::models::CategorySnapshot,
            crate::models::category::CategoryInput,
            crate::models::Book,
            crate::models::BookSnapshot,
            crate::models::book::BookInput,
            crate::models::Borrower,
            crate::models::BorrowerInput,
            crate::models::Borrow,
            crate::models::BorrowerSnapshot,
            crate::models::borrow::CreateBorrow,
            crate::models::borrow::ReturnBorrow,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User registration and profile"),
        (name = "categories", description = "Book categories"),
        (name = "books", description = "Book catalog"),
        (name = "borrowers", description = "Library members"),
        (name = "borrows", description = "Lending and returns")
    )
)]
pub struct ApiDoc;

/// Registers the `x-auth` header token scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "x_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(super::AUTH_HEADER))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
