//! Runner handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    constants::roles,
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::Runner,
    state::AppState,
};

use super::request::{RunnerRequest, RunnersBatchQuery};

/// Create a runner
pub async fn create_runner(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<RunnerRequest>,
) -> AppResult<Json<Runner>> {
    auth_user.require_admin()?;

    let runner = state.runners().create_runner(payload.into()).await?;
    Ok(Json(runner))
}

/// Update a runner's descriptive fields
pub async fn update_runner(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<RunnerRequest>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    let mut runner = Runner::from(payload);
    runner.id = id;
    state.runners().update_runner(runner).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deactivate a runner
pub async fn delete_runner(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    state.runners().delete_runner(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a runner with their results
pub async fn get_runner(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Runner>> {
    auth_user.require_any(&[roles::ADMIN, roles::RUNNER])?;

    let runner = state.runners().get_runner(&id).await?;
    Ok(Json(runner))
}

/// List runners, ranked by country or year when filtered
pub async fn get_runners_batch(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<RunnersBatchQuery>,
) -> AppResult<Json<Vec<Runner>>> {
    auth_user.require_any(&[roles::ADMIN, roles::RUNNER])?;

    let runners = state
        .runners()
        .get_runners_batch(query.country.as_deref(), query.year.as_deref())
        .await?;
    Ok(Json(runners))
}
