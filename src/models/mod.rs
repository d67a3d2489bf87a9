//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod race_result;
pub mod race_time;
pub mod runner;
pub mod user;

pub use race_result::*;
pub use race_time::*;
pub use runner::*;
pub use user::*;
