//! Authentication service
//!
//! Callers log in with a username and password and receive an opaque
//! access token. Only the SHA-256 of the token is stored.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    config::BootstrapUser,
    constants::ACCESS_TOKEN_BYTES,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::{generate_access_token, hash_token},
};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Login with username and password, returning a fresh access token
    pub async fn login(pool: &PgPool, username: &str, password: &str) -> AppResult<(User, String)> {
        let user = UserRepository::find_by_username(pool, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            debug!(username = %username, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let access_token = generate_access_token(ACCESS_TOKEN_BYTES);
        UserRepository::set_token_hash(pool, &user.id, Some(&hash_token(&access_token))).await?;

        info!(user_id = %user.id, "User logged in");
        Ok((user, access_token))
    }

    /// Invalidate an access token
    pub async fn logout(pool: &PgPool, access_token: &str) -> AppResult<()> {
        if !UserRepository::clear_token_hash(pool, &hash_token(access_token)).await? {
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }

    /// Resolve the user holding an access token and check their role
    pub async fn authorize(pool: &PgPool, access_token: &str, allowed_roles: &[&str]) -> AppResult<User> {
        if access_token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let user = UserRepository::find_by_token_hash(pool, &hash_token(access_token))
            .await?
            .ok_or(AppError::Unauthorized)?;

        Self::check_role(&user, allowed_roles)?;
        Ok(user)
    }

    /// Check that a user holds one of the allowed roles
    pub fn check_role(user: &User, allowed_roles: &[&str]) -> AppResult<()> {
        if user.has_any_role(allowed_roles) {
            Ok(())
        } else {
            debug!(user_id = %user.id, role = %user.role, "Authorization failed: role not allowed");
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }

    /// Create the configured bootstrap account unless it already exists
    pub async fn ensure_user(pool: &PgPool, bootstrap: &BootstrapUser) -> AppResult<()> {
        if UserRepository::find_by_username(pool, &bootstrap.username)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let password_hash = Self::hash_password(&bootstrap.password)?;
        let user =
            UserRepository::create(pool, &bootstrap.username, &password_hash, &bootstrap.role).await?;

        info!(user_id = %user.id, username = %user.username, "Bootstrap user created");
        Ok(())
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
