//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::{generate_access_token, hash_token};
pub use time::{current_year, now_utc};
pub use validation::{validate_result, validate_runner, validate_year_filter};
