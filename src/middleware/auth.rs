//! Authentication extractor
//!
//! Handlers take an [`AuthenticatedUser`] argument and then check the roles
//! they allow with [`AuthenticatedUser::require_any`].

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{TOKEN_HEADER, roles},
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
};

/// Authenticated user resolved from the `Token` header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Fail with forbidden unless the user holds one of `allowed_roles`
    pub fn require_any(&self, allowed_roles: &[&str]) -> AppResult<()> {
        if allowed_roles.contains(&self.role.as_str()) {
            Ok(())
        } else {
            debug!(user_id = %self.id, role = %self.role, "Authorization failed: role not allowed");
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }

    pub fn require_admin(&self) -> AppResult<()> {
        self.require_any(&[roles::ADMIN])
    }
}

/// Read the access token from request headers
pub fn access_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();

        let Some(token) = access_token(&parts.headers) else {
            debug!(path = %path, "Auth failed: no {} header", TOKEN_HEADER);
            return Err(AppError::Unauthorized);
        };

        let user = AuthService::authorize(state.db(), token, roles::ALL).await?;
        debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
