//! Runners - Race Results Tracking Backend
//!
//! This library provides the core functionality for the runners service,
//! which stores runners and their race results and keeps each runner's
//! personal best and season best in step with the recorded results.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic, including the result workflow
//! - **Repositories**: Database access behind the store traits in [`db`]
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
