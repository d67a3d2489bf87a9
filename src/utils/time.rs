//! Time utilities

use chrono::{DateTime, Datelike, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// The current calendar year, which bounds result years and defines the season
pub fn current_year() -> i32 {
    now_utc().year()
}

/// Check that a year is not negative and not in the future
pub fn is_valid_year(year: i32, current_year: i32) -> bool {
    (0..=current_year).contains(&year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_year() {
        assert!(current_year() >= 2024);
    }

    #[test]
    fn test_is_valid_year() {
        assert!(is_valid_year(0, 2025));
        assert!(is_valid_year(2025, 2025));
        assert!(!is_valid_year(2026, 2025));
        assert!(!is_valid_year(-1, 2025));
    }
}
