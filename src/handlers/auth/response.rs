//! Authentication response DTOs

use serde::Serialize;

/// Login response carrying the access token for the `Token` header
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
    pub role: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}
