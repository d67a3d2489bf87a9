//! Race result model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single race result recorded for a runner
///
/// `race_result` keeps the time exactly as it was submitted ("HH:MM:SS").
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RaceResult {
    pub id: String,
    pub runner_id: String,
    pub race_result: String,
    pub location: String,
    pub position: i32,
    pub year: i32,
}

impl RaceResult {
    /// Build a result that has not been stored yet
    pub fn new(
        runner_id: impl Into<String>,
        race_result: impl Into<String>,
        location: impl Into<String>,
        position: i32,
        year: i32,
    ) -> Self {
        Self {
            id: String::new(),
            runner_id: runner_id.into(),
            race_result: race_result.into(),
            location: location.into(),
            position,
            year,
        }
    }
}
