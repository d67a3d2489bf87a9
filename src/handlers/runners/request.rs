//! Runner request DTOs

use serde::Deserialize;

use crate::models::Runner;

/// Create or update runner request
///
/// Missing fields default to empty so that validation reports them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunnerRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub country: String,
}

impl From<RunnerRequest> for Runner {
    fn from(request: RunnerRequest) -> Self {
        Runner::new(request.first_name, request.last_name, request.age, request.country)
    }
}

/// Runner listing filters; at most one may be set
#[derive(Debug, Default, Deserialize)]
pub struct RunnersBatchQuery {
    pub country: Option<String>,
    pub year: Option<String>,
}
