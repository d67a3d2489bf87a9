//! Race result request DTOs

use serde::Deserialize;

use crate::models::RaceResult;

/// Record result request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateResultRequest {
    pub runner_id: String,
    pub race_result: String,
    pub location: String,
    pub position: i32,
    pub year: i32,
}

impl From<CreateResultRequest> for RaceResult {
    fn from(request: CreateResultRequest) -> Self {
        RaceResult::new(
            request.runner_id,
            request.race_result,
            request.location,
            request.position,
            request.year,
        )
    }
}
