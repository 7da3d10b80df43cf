//! User registration and profile endpoints

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    error::AppResult,
    models::user::{RegisterUser, User},
};

use super::{AuthenticatedUser, ValidatedJson, AUTH_HEADER};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "User registered, token in the x-auth header", body = User),
        (status = 400, description = "Invalid input or email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    ValidatedJson(user): ValidatedJson<RegisterUser>,
) -> AppResult<impl IntoResponse> {
    let (token, created) = state.services.auth.register(user).await?;
    Ok(([(AUTH_HEADER, token)], Json(created)))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("x_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "No token provided"),
        (status = 400, description = "Invalid token"),
        (status = 404, description = "User no longer exists")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.auth.get_current_user(&claims.user_id).await?;
    Ok(Json(user))
}
