//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why a presented token was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid,
        }
    }
}

/// Rejections raised by the borrow and return transactions
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanError {
    #[error("Invalid borrower")]
    InvalidBorrower,
    #[error("Invalid book")]
    InvalidBook,
    #[error("Book not in stock")]
    OutOfStock,
    #[error("return already processed")]
    AlreadyReturned,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Access denied. No token provided")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] AuthError),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Loan(#[from] LoanError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::Conflict(_)
            | AppError::Loan(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::MissingToken | AppError::InvalidCredentials | AppError::Loan(_) => {
                self.to_string()
            }
            AppError::InvalidToken(e) => {
                tracing::debug!("Rejected token: {}", e);
                e.to_string()
            }
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Unavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                "Service unavailable".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Something failed".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Something failed".to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
