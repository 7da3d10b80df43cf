//! Users domain methods

use async_trait::async_trait;

use super::PgRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        user::{NewUser, User},
        ObjectId,
    },
};

#[async_trait]
pub trait UsersStore {
    /// Get user by ID
    async fn users_get_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    /// Get user by email (authentication key)
    async fn users_get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Check if email already exists
    async fn users_email_exists(&self, email: &str) -> AppResult<bool>;

    /// Create a user; fails with a conflict when the email is taken
    async fn users_create(&self, user: &NewUser) -> AppResult<User>;
}

pub(crate) const DUPLICATE_EMAIL: &str = "User already registered";

#[async_trait]
impl UsersStore for PgRepository {
    async fn users_get_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn users_get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn users_email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn users_create(&self, user: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(ObjectId::new())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // Lost the race against a concurrent registration
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(DUPLICATE_EMAIL.to_string())
            }
            e => AppError::Database(e),
        })
    }
}
