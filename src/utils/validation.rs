//! Input validation utilities
//!
//! Each validator reports the first rule that fails, as the literal message
//! returned to the caller.

use crate::{
    models::{RaceResult, RaceTime, Runner},
    utils::time::is_valid_year,
};

/// Validate the descriptive fields of a runner
pub fn validate_runner(runner: &Runner) -> Result<(), &'static str> {
    if runner.first_name.is_empty() {
        return Err("Invalid first name");
    }
    if runner.last_name.is_empty() {
        return Err("Invalid last name");
    }
    if runner.age < 0 {
        return Err("Invalid age");
    }
    if runner.country.is_empty() {
        return Err("Invalid country");
    }
    Ok(())
}

/// Validate a result about to be recorded, returning its parsed time
pub fn validate_result(result: &RaceResult, current_year: i32) -> Result<RaceTime, &'static str> {
    if result.runner_id.is_empty() {
        return Err("Invalid runner ID");
    }
    if result.race_result.is_empty() {
        return Err("Invalid race result");
    }
    if result.location.is_empty() {
        return Err("Invalid location");
    }
    if result.position < 0 {
        return Err("Invalid position");
    }
    if !is_valid_year(result.year, current_year) {
        return Err("Invalid year");
    }
    result
        .race_result
        .parse()
        .map_err(|_| "Invalid race result")
}

/// Validate a year filter given as text
pub fn validate_year_filter(year: &str, current_year: i32) -> Result<i32, &'static str> {
    let year: i32 = year.trim().parse().map_err(|_| "Invalid year")?;
    if !is_valid_year(year, current_year) {
        return Err("Invalid year");
    }
    Ok(year)
}
