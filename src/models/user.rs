//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::ObjectId;

/// Registered user (staff member operating the library)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing, default)]
    #[schema(write_only)]
    pub password: String,
}

/// Fields persisted when a user registers
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterUser {
    #[validate(length(min = 5, max = 50, message = "username must be 5-50 characters long"))]
    pub username: String,
    #[validate(
        length(min = 10, max = 100, message = "email must be 10-100 characters long"),
        email(message = "email must be a valid email")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 255, message = "password must be 6-255 characters long"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(
        length(min = 10, max = 100, message = "email must be 10-100 characters long"),
        email(message = "email must be a valid email")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 255, message = "password must be 6-255 characters long"))]
    pub password: String,
}

/// JWT claims carried by the `x-auth` token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(rename = "_id")]
    pub user_id: ObjectId,
    pub iat: i64,
    pub exp: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
