//! Database module
//!
//! This module handles database connections, migrations, and repositories.
//!
//! The services talk to storage through the [`Database`], [`RunnerStore`]
//! and [`ResultStore`] traits. Every store call takes an explicit scope
//! handed out by a [`Database`]; passing the same transactional scope to
//! both stores makes their writes commit or roll back together.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod repositories;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{RaceResult, Runner},
};

pub use connection::*;
pub use postgres::{PgDatabase, PgScope};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Source of storage scopes
#[async_trait]
pub trait Database: Send + Sync {
    /// Handle passed to every store call
    type Scope: Send;

    /// Acquire a scope whose statements commit one by one
    async fn connection(&self) -> AppResult<Self::Scope>;

    /// Open a transaction. Dropping the scope without [`Database::commit`]
    /// rolls every write back.
    async fn begin(&self) -> AppResult<Self::Scope>;

    /// Commit a scope opened with [`Database::begin`]
    async fn commit(&self, scope: Self::Scope) -> AppResult<()>;
}

/// Runner persistence
#[async_trait]
pub trait RunnerStore: Send + Sync {
    type Scope: Send;

    /// Insert a runner, assigning its ID
    async fn create_runner(&self, scope: &mut Self::Scope, runner: &Runner) -> AppResult<Runner>;

    /// Update the descriptive fields of an active runner
    async fn update_runner(&self, scope: &mut Self::Scope, runner: &Runner) -> AppResult<()>;

    /// Update only `personal_best` and `season_best`
    async fn update_runner_results(&self, scope: &mut Self::Scope, runner: &Runner)
    -> AppResult<()>;

    /// Mark a runner inactive
    async fn delete_runner(&self, scope: &mut Self::Scope, id: &str) -> AppResult<()>;

    async fn get_runner(&self, scope: &mut Self::Scope, id: &str) -> AppResult<Option<Runner>>;

    async fn get_all_runners(&self, scope: &mut Self::Scope) -> AppResult<Vec<Runner>>;

    /// Fastest active runners of a country, by personal best
    async fn get_runners_by_country(
        &self,
        scope: &mut Self::Scope,
        country: &str,
        limit: i64,
    ) -> AppResult<Vec<Runner>>;

    /// Fastest active runners of a year; `season_best` holds each runner's
    /// best time of that year
    async fn get_runners_by_season_best(
        &self,
        scope: &mut Self::Scope,
        year: i32,
        limit: i64,
    ) -> AppResult<Vec<Runner>>;
}

/// Race result persistence
#[async_trait]
pub trait ResultStore: Send + Sync {
    type Scope: Send;

    /// Insert a result, assigning its ID. Fails with not-found when the
    /// runner does not exist.
    async fn create_result(
        &self,
        scope: &mut Self::Scope,
        result: &RaceResult,
    ) -> AppResult<RaceResult>;

    /// Delete a result and return the deleted row
    async fn delete_result(&self, scope: &mut Self::Scope, id: &str) -> AppResult<RaceResult>;

    /// All results of a runner, newest year first
    async fn get_all_runner_results(
        &self,
        scope: &mut Self::Scope,
        runner_id: &str,
    ) -> AppResult<Vec<RaceResult>>;

    /// Fastest time over all of the runner's results
    async fn get_personal_best_results(
        &self,
        scope: &mut Self::Scope,
        runner_id: &str,
    ) -> AppResult<Option<String>>;

    /// Fastest time over the runner's results of `year`
    async fn get_season_best_results(
        &self,
        scope: &mut Self::Scope,
        runner_id: &str,
        year: i32,
    ) -> AppResult<Option<String>>;
}
