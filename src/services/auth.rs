//! Authentication and user registration service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult, AuthError},
    models::{
        user::{NewUser, RegisterUser, User, UserClaims},
        ObjectId,
    },
    repository::{users::DUPLICATE_EMAIL, Repository, UsersStore},
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user and log them in
    pub async fn register(&self, user: RegisterUser) -> AppResult<(String, User)> {
        if self.repository.users_email_exists(&user.email).await? {
            tracing::debug!(email = %user.email, "Registration with an existing email");
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = self.hash_password(&user.password)?;
        let created = self
            .repository
            .users_create(&NewUser {
                username: user.username,
                email: user.email,
                password_hash,
            })
            .await?;

        let token = self.issue_token(&created.id)?;
        tracing::info!(user_id = %created.id, "User registered");

        Ok((token, created))
    }

    /// Authenticate user by email and password, returning a fresh token.
    ///
    /// Unknown email and wrong password fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users_get_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(&user.id)?;
        Ok((token, user))
    }

    /// Get the user a token was issued to
    pub async fn get_current_user(&self, user_id: &ObjectId) -> AppResult<User> {
        self.repository
            .users_get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("The user with the given id was not found".to_string()))
    }

    /// Create a signed token for a user, valid for the configured lifetime
    pub fn issue_token(&self, user_id: &ObjectId) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            user_id: user_id.clone(),
            iat: now,
            exp,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Check a token's signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<UserClaims, AuthError> {
        UserClaims::from_token(token, &self.config.jwt_secret).map_err(AuthError::from)
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Repository::memory(), AuthConfig::default())
    }

    fn registration() -> RegisterUser {
        RegisterUser {
            username: "exist user".to_string(),
            email: "exist@mail.com".to_string(),
            password: "password".to_string(),
        }
    }

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let service = service();
        let first = service.hash_password("password").unwrap();
        let second = service.hash_password("password").unwrap();
        assert_ne!(first, "password");
        assert_ne!(first, second);

        let user = User {
            id: ObjectId::new(),
            username: "exist user".to_string(),
            email: "exist@mail.com".to_string(),
            password: first,
        };
        assert!(service.verify_password(&user, "password").unwrap());
        assert!(!service.verify_password(&user, "incorrect").unwrap());
    }

    #[test]
    fn test_token_round_trip() {
        let service = service();
        let id = ObjectId::new();
        let token = service.issue_token(&id).unwrap();
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, id);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            user_id: ObjectId::new(),
            iat: now - 2 * 86_400,
            exp: now - 86_400,
        };
        let token = claims
            .create_token(&AuthConfig::default().jwt_secret)
            .unwrap();
        assert_eq!(service.verify_token(&token).unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn test_foreign_or_garbage_token() {
        let service = service();
        let other = AuthService::new(
            Repository::memory(),
            AuthConfig {
                jwt_secret: "another-secret".to_string(),
                jwt_expiration_hours: 24,
            },
        );
        let token = other.issue_token(&ObjectId::new()).unwrap();
        assert_eq!(service.verify_token(&token).unwrap_err(), AuthError::Invalid);
        assert_eq!(service.verify_token("a").unwrap_err(), AuthError::Invalid);
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let service = service();
        let (_, user) = service.register(registration()).await.unwrap();
        assert_ne!(user.password, "password");

        let (token, logged_in) = service
            .authenticate("exist@mail.com", "password")
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(service.verify_token(&token).unwrap().user_id, user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service.register(registration()).await.unwrap();
        let err = service.register(registration()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_authenticate_uniform_failure() {
        let service = service();
        service.register(registration()).await.unwrap();

        let unknown = service.authenticate("unknown@mail.com", "password").await;
        let wrong = service.authenticate("exist@mail.com", "incorrect").await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
    }
}
