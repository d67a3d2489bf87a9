//! In-memory storage
//!
//! Implements the store traits over ordered maps so services can run
//! without Postgres. A transaction works on a private copy of the tables
//! which replaces the shared tables on commit and is discarded on drop.
//! Writes made by other scopes while a transaction is open are overwritten
//! by its commit.

use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Database, ResultStore, RunnerStore};
use crate::{
    error::{AppError, AppResult},
    models::{RaceResult, RaceTime, Runner},
};

/// Stored rows, keyed by ID
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub runners: BTreeMap<String, Runner>,
    pub results: BTreeMap<String, RaceResult>,
}

/// Switches for forcing store failures
#[derive(Debug, Default)]
struct Faults {
    runner_results_update: AtomicBool,
}

/// In-memory [`Database`]
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    faults: Arc<Faults>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runner_store(&self) -> MemoryRunnerStore {
        MemoryRunnerStore {
            faults: self.faults.clone(),
        }
    }

    pub fn result_store(&self) -> MemoryResultStore {
        MemoryResultStore
    }

    /// Copy of the committed tables
    pub async fn snapshot(&self) -> Tables {
        self.tables.lock().await.clone()
    }

    /// Insert a runner as-is, assigning an ID when it has none
    pub async fn insert_runner(&self, mut runner: Runner) -> Runner {
        if runner.id.is_empty() {
            runner.id = Uuid::new_v4().to_string();
        }
        self.tables
            .lock()
            .await
            .runners
            .insert(runner.id.clone(), runner.clone());
        runner
    }

    /// Insert a result as-is, assigning an ID when it has none
    pub async fn insert_result(&self, mut result: RaceResult) -> RaceResult {
        if result.id.is_empty() {
            result.id = Uuid::new_v4().to_string();
        }
        self.tables
            .lock()
            .await
            .results
            .insert(result.id.clone(), result.clone());
        result
    }

    pub async fn runner(&self, id: &str) -> Option<Runner> {
        self.tables.lock().await.runners.get(id).cloned()
    }

    pub async fn result(&self, id: &str) -> Option<RaceResult> {
        self.tables.lock().await.results.get(id).cloned()
    }

    /// Make every `update_runner_results` call fail until switched off
    pub fn fail_runner_results_updates(&self, fail: bool) {
        self.faults.runner_results_update.store(fail, Ordering::SeqCst);
    }
}

/// Scope over the in-memory tables
#[derive(Debug)]
pub struct MemoryScope {
    shared: Arc<Mutex<Tables>>,
    staged: Option<Tables>,
}

impl MemoryScope {
    async fn with<T>(&mut self, f: impl FnOnce(&mut Tables) -> T + Send) -> T {
        match &mut self.staged {
            Some(tables) => f(tables),
            None => f(&mut *self.shared.lock().await),
        }
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Scope = MemoryScope;

    async fn connection(&self) -> AppResult<MemoryScope> {
        Ok(MemoryScope {
            shared: self.tables.clone(),
            staged: None,
        })
    }

    async fn begin(&self) -> AppResult<MemoryScope> {
        let staged = self.tables.lock().await.clone();
        Ok(MemoryScope {
            shared: self.tables.clone(),
            staged: Some(staged),
        })
    }

    async fn commit(&self, scope: MemoryScope) -> AppResult<()> {
        if let Some(staged) = scope.staged {
            *scope.shared.lock().await = staged;
        }
        Ok(())
    }
}

/// Fastest parseable time among `times`
fn fastest<'a>(times: impl Iterator<Item = &'a str>) -> Option<String> {
    times
        .filter_map(|time| time.parse::<RaceTime>().ok())
        .min()
        .map(|time| time.as_str().to_string())
}

fn sort_key(best: Option<&str>) -> Option<RaceTime> {
    best.and_then(|best| best.parse().ok())
}

/// In-memory [`RunnerStore`]
#[derive(Debug, Clone)]
pub struct MemoryRunnerStore {
    faults: Arc<Faults>,
}

#[async_trait]
impl RunnerStore for MemoryRunnerStore {
    type Scope = MemoryScope;

    async fn create_runner(&self, scope: &mut MemoryScope, runner: &Runner) -> AppResult<Runner> {
        let mut runner = runner.clone();
        runner.id = Uuid::new_v4().to_string();
        runner.is_active = true;
        runner.personal_best = None;
        runner.season_best = None;
        runner.results.clear();

        let stored = runner.clone();
        scope
            .with(move |tables| tables.runners.insert(stored.id.clone(), stored))
            .await;
        Ok(runner)
    }

    async fn update_runner(&self, scope: &mut MemoryScope, runner: &Runner) -> AppResult<()> {
        scope
            .with(|tables| match tables.runners.get_mut(&runner.id) {
                Some(stored) if stored.is_active => {
                    stored.first_name = runner.first_name.clone();
                    stored.last_name = runner.last_name.clone();
                    stored.age = runner.age;
                    stored.country = runner.country.clone();
                    Ok(())
                }
                _ => Err(AppError::not_found("Runner not found")),
            })
            .await
    }

    async fn update_runner_results(&self, scope: &mut MemoryScope, runner: &Runner) -> AppResult<()> {
        if self.faults.runner_results_update.load(Ordering::SeqCst) {
            return Err(AppError::Database("runner update failed".to_string()));
        }

        scope
            .with(|tables| match tables.runners.get_mut(&runner.id) {
                Some(stored) => {
                    stored.personal_best = runner.personal_best.clone();
                    stored.season_best = runner.season_best.clone();
                    Ok(())
                }
                None => Err(AppError::not_found("Runner not found")),
            })
            .await
    }

    async fn delete_runner(&self, scope: &mut MemoryScope, id: &str) -> AppResult<()> {
        scope
            .with(|tables| match tables.runners.get_mut(id) {
                Some(stored) if stored.is_active => {
                    stored.is_active = false;
                    Ok(())
                }
                _ => Err(AppError::not_found("Runner not found")),
            })
            .await
    }

    async fn get_runner(&self, scope: &mut MemoryScope, id: &str) -> AppResult<Option<Runner>> {
        Ok(scope.with(|tables| tables.runners.get(id).cloned()).await)
    }

    async fn get_all_runners(&self, scope: &mut MemoryScope) -> AppResult<Vec<Runner>> {
        let mut runners: Vec<Runner> = scope
            .with(|tables| {
                tables
                    .runners
                    .values()
                    .filter(|runner| runner.is_active)
                    .cloned()
                    .collect()
            })
            .await;
        runners.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(runners)
    }

    async fn get_runners_by_country(
        &self,
        scope: &mut MemoryScope,
        country: &str,
        limit: i64,
    ) -> AppResult<Vec<Runner>> {
        let mut runners: Vec<Runner> = scope
            .with(|tables| {
                tables
                    .runners
                    .values()
                    .filter(|runner| {
                        runner.is_active && runner.country == country && runner.personal_best().is_some()
                    })
                    .cloned()
                    .collect()
            })
            .await;
        runners.sort_by_key(|runner| sort_key(runner.personal_best()));
        runners.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(runners)
    }

    async fn get_runners_by_season_best(
        &self,
        scope: &mut MemoryScope,
        year: i32,
        limit: i64,
    ) -> AppResult<Vec<Runner>> {
        let mut runners: Vec<Runner> = scope
            .with(|tables| {
                tables
                    .runners
                    .values()
                    .filter(|runner| runner.is_active)
                    .filter_map(|runner| {
                        let best = fastest(
                            tables
                                .results
                                .values()
                                .filter(|result| result.runner_id == runner.id && result.year == year)
                                .map(|result| result.race_result.as_str()),
                        )?;
                        let mut runner = runner.clone();
                        runner.season_best = Some(best);
                        Some(runner)
                    })
                    .collect()
            })
            .await;
        runners.sort_by_key(|runner| sort_key(runner.season_best()));
        runners.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(runners)
    }
}

/// In-memory [`ResultStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryResultStore;

#[async_trait]
impl ResultStore for MemoryResultStore {
    type Scope = MemoryScope;

    async fn create_result(
        &self,
        scope: &mut MemoryScope,
        result: &RaceResult,
    ) -> AppResult<RaceResult> {
        let mut result = result.clone();
        result.id = Uuid::new_v4().to_string();

        let stored = result.clone();
        scope
            .with(move |tables| {
                if !tables.runners.contains_key(&stored.runner_id) {
                    return Err(AppError::not_found("Runner not found"));
                }
                tables.results.insert(stored.id.clone(), stored);
                Ok(())
            })
            .await?;
        Ok(result)
    }

    async fn delete_result(&self, scope: &mut MemoryScope, id: &str) -> AppResult<RaceResult> {
        scope
            .with(|tables| tables.results.remove(id))
            .await
            .ok_or_else(|| AppError::not_found("Result not found"))
    }

    async fn get_all_runner_results(
        &self,
        scope: &mut MemoryScope,
        runner_id: &str,
    ) -> AppResult<Vec<RaceResult>> {
        let mut results: Vec<RaceResult> = scope
            .with(|tables| {
                tables
                    .results
                    .values()
                    .filter(|result| result.runner_id == runner_id)
                    .cloned()
                    .collect()
            })
            .await;
        results.sort_by_key(|result| {
            (
                std::cmp::Reverse(result.year),
                result.race_result.parse::<RaceTime>().ok(),
            )
        });
        Ok(results)
    }

    async fn get_personal_best_results(
        &self,
        scope: &mut MemoryScope,
        runner_id: &str,
    ) -> AppResult<Option<String>> {
        Ok(scope
            .with(|tables| {
                fastest(
                    tables
                        .results
                        .values()
                        .filter(|result| result.runner_id == runner_id)
                        .map(|result| result.race_result.as_str()),
                )
            })
            .await)
    }

    async fn get_season_best_results(
        &self,
        scope: &mut MemoryScope,
        runner_id: &str,
        year: i32,
    ) -> AppResult<Option<String>> {
        Ok(scope
            .with(|tables| {
                fastest(
                    tables
                        .results
                        .values()
                        .filter(|result| result.runner_id == runner_id && result.year == year)
                        .map(|result| result.race_result.as_str()),
                )
            })
            .await)
    }
}
