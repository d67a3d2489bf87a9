//! Business logic services

pub mod auth_service;
pub mod result_service;
pub mod runner_service;

pub use auth_service::AuthService;
pub use result_service::ResultService;
pub use runner_service::{RunnerService, validate_runner};
