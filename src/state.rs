//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    db::{
        PgDatabase,
        repositories::{ResultRepository, RunnerRepository},
    },
    services::{ResultService, RunnerService},
};

/// Result workflow over Postgres
pub type PgResultService = ResultService<PgDatabase, RunnerRepository, ResultRepository>;

/// Runner service over Postgres
pub type PgRunnerService = RunnerService<PgDatabase, RunnerRepository, ResultRepository>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    pub runners: PgRunnerService,

    pub results: PgResultService,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        let database = PgDatabase::new(db.clone());

        Self {
            inner: Arc::new(AppStateInner {
                runners: RunnerService::new(database.clone(), RunnerRepository, ResultRepository),
                results: ResultService::new(database, RunnerRepository, ResultRepository),
                db,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the runner service
    pub fn runners(&self) -> &PgRunnerService {
        &self.inner.runners
    }

    /// Get the result service
    pub fn results(&self) -> &PgResultService {
        &self.inner.results
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
