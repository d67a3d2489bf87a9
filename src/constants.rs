//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default wait for a pooled connection, in seconds
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Request header carrying the caller's access token
pub const TOKEN_HEADER: &str = "Token";

/// Random bytes in a generated access token
pub const ACCESS_TOKEN_BYTES: usize = 32;

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const RUNNER: &str = "runner";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, RUNNER];
}

// =============================================================================
// QUERIES
// =============================================================================

/// Number of runners returned by the country and season rankings
pub const RANKING_LIMIT: i64 = 10;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
