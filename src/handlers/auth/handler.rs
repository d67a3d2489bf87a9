//! Authentication handler implementations

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::access_token,
    services::AuthService,
    state::AppState,
};

use super::{
    request::LoginRequest,
    response::{LoginResponse, LogoutResponse},
};

/// Login with username and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let (user, access_token) =
        AuthService::login(state.db(), &payload.username, &payload.password).await?;

    Ok(Json(LoginResponse {
        access_token,
        username: user.username,
        role: user.role,
    }))
}

/// Logout (invalidate the presented token)
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Json<LogoutResponse>> {
    let token = access_token(&headers).ok_or(AppError::Unauthorized)?;

    AuthService::logout(state.db(), token).await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
