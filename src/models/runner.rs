//! Runner model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::RaceResult;

/// Runner database model
///
/// `personal_best` and `season_best` are caches derived from the runner's
/// results and are only ever written by the result workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Runner {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub is_active: bool,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_best: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_best: Option<String>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<RaceResult>,
}

impl Runner {
    /// Create an active runner with no recorded times
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            is_active: true,
            country: country.into(),
            personal_best: None,
            season_best: None,
            results: Vec::new(),
        }
    }

    /// Personal best, treating an empty string as unset
    pub fn personal_best(&self) -> Option<&str> {
        self.personal_best.as_deref().filter(|best| !best.is_empty())
    }

    /// Season best, treating an empty string as unset
    pub fn season_best(&self) -> Option<&str> {
        self.season_best.as_deref().filter(|best| !best.is_empty())
    }
}
