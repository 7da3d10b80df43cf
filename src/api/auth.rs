//! Authentication endpoints

use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::AppResult, models::user::LoginRequest};

use super::{ValidatedJson, AUTH_HEADER};

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token in the x-auth header", body = crate::models::User),
        (status = 400, description = "Invalid email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (token, user) = state
        .services
        .auth
        .authenticate(&request.email, &request.password)
        .await?;

    Ok(([(AUTH_HEADER, token)], Json(user)))
}
