//! Race result handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    constants::roles,
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::RaceResult,
    state::AppState,
};

use super::request::CreateResultRequest;

/// Record a race result
pub async fn create_result(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateResultRequest>,
) -> AppResult<Json<RaceResult>> {
    auth_user.require_any(&[roles::ADMIN, roles::RUNNER])?;

    let result = state.results().create_result(payload.into()).await?;
    Ok(Json(result))
}

/// Delete a race result
pub async fn delete_result(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth_user.require_any(&[roles::ADMIN, roles::RUNNER])?;

    state.results().delete_result(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
