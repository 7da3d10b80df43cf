//! API handlers for Libris REST endpoints

pub mod auth;
pub mod books;
pub mod borrowers;
pub mod borrows;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, HeaderName},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{
    error::{AppError, AuthError},
    models::{user::UserClaims, ObjectId},
    AppState,
};

/// Header carrying the session token, both ways
pub const AUTH_HEADER: &str = "x-auth";

/// Extractor for authenticated user from the `x-auth` token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTH_HEADER)
            .filter(|value| !value.is_empty())
            .ok_or(AppError::MissingToken)?;

        // Present but unreadable counts as a bad token, not a missing one
        let token = value.to_str().map_err(|_| AuthError::Invalid)?;
        let claims = state.services.auth.verify_token(token.trim())?;

        Ok(AuthenticatedUser(claims))
    }
}

/// `:id` path segment parsed as an [`ObjectId`]; malformed ids are not found
pub struct IdPath(pub ObjectId);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = || AppError::NotFound("Invalid ID.".to_string());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;

        raw.parse::<ObjectId>().map(IdPath).map_err(|_| not_found())
    }
}

/// JSON body that has passed its `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(first_message(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// First failing rule, by field name, for a stable message
fn first_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errors)| {
            errors.first().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .unwrap_or_else(|| "Invalid request body".to_string())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(AUTH_HEADER)]);

    let api = Router::new()
        // Authentication
        .route("/auth", post(auth::login))
        // Users
        .route("/users", post(users::register))
        .route("/users/me", get(users::me))
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Borrowers
        .route(
            "/borrowers",
            get(borrowers::list_borrowers).post(borrowers::create_borrower),
        )
        .route(
            "/borrowers/:id",
            get(borrowers::get_borrower)
                .put(borrowers::update_borrower)
                .delete(borrowers::delete_borrower),
        )
        // Borrows
        .route("/borrows", get(borrows::list_borrows).post(borrows::create_borrow))
        .route("/borrows/:id", get(borrows::get_borrow))
        .route("/returns", post(borrows::return_borrow));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
