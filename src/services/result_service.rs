//! Result service
//!
//! Recording and deleting results keeps each runner's cached
//! `personal_best` and `season_best` in line with the stored results.

use tracing::{info, warn};

use crate::{
    db::{Database, ResultStore, RunnerStore},
    error::{AppError, AppResult},
    models::{RaceResult, RaceTime, Runner},
    utils::{current_year, validate_result},
};

/// Result service for business logic
pub struct ResultService<D, R, S> {
    db: D,
    runners: R,
    results: S,
}

impl<D, R, S> ResultService<D, R, S>
where
    D: Database,
    R: RunnerStore<Scope = D::Scope>,
    S: ResultStore<Scope = D::Scope>,
{
    pub fn new(db: D, runners: R, results: S) -> Self {
        Self {
            db,
            runners,
            results,
        }
    }

    /// Record a result and fold its time into the runner's bests.
    ///
    /// The insert and the runner update run on separate auto-commit
    /// statements: if the update fails the result stays stored and the
    /// runner's bests are stale.
    pub async fn create_result(&self, result: RaceResult) -> AppResult<RaceResult> {
        let current_year = current_year();
        let time = validate_result(&result, current_year).map_err(AppError::bad_request)?;

        let mut scope = self.db.connection().await?;
        let created = self.results.create_result(&mut scope, &result).await?;

        let mut runner = self
            .runners
            .get_runner(&mut scope, &created.runner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Runner not found"))?;

        record_best_times(&mut runner, &time, created.year, current_year)?;

        if let Err(err) = self.runners.update_runner_results(&mut scope, &runner).await {
            warn!(
                result_id = %created.id,
                runner_id = %runner.id,
                error = %err,
                "Result stored but runner best times were not updated"
            );
            return Err(err);
        }

        info!(
            result_id = %created.id,
            runner_id = %runner.id,
            race_result = %created.race_result,
            "Result created"
        );
        Ok(created)
    }

    /// Delete a result and recompute the bests it may have held, all in one
    /// transaction.
    pub async fn delete_result(&self, result_id: &str) -> AppResult<()> {
        if result_id.is_empty() {
            return Err(AppError::bad_request("Invalid result ID"));
        }

        let mut tx = self.db.begin().await?;

        let deleted = self.results.delete_result(&mut tx, result_id).await?;

        let mut runner = self
            .runners
            .get_runner(&mut tx, &deleted.runner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Runner not found"))?;

        if runner.personal_best() == Some(deleted.race_result.as_str()) {
            runner.personal_best = self
                .results
                .get_personal_best_results(&mut tx, &deleted.runner_id)
                .await?;
        }

        // A season best carried over from an earlier year only changes once
        // the runner races this year.
        if runner.season_best() == Some(deleted.race_result.as_str())
            && deleted.year == current_year()
        {
            runner.season_best = self
                .results
                .get_season_best_results(&mut tx, &deleted.runner_id, deleted.year)
                .await?;
        }

        self.runners.update_runner_results(&mut tx, &runner).await?;
        self.db.commit(tx).await?;

        info!(result_id = %result_id, runner_id = %runner.id, "Result deleted");
        Ok(())
    }
}

/// Fold a newly recorded time into the runner's bests. Only results from
/// `current_year` count towards the season best.
fn record_best_times(
    runner: &mut Runner,
    time: &RaceTime,
    year: i32,
    current_year: i32,
) -> AppResult<()> {
    runner.personal_best = Some(faster(
        runner.personal_best(),
        time,
        "Failed to parse personal best",
    )?);

    if year == current_year {
        runner.season_best = Some(faster(
            runner.season_best(),
            time,
            "Failed to parse season best",
        )?);
    }
    Ok(())
}

/// The faster of a stored best and a new time, as the string to store
fn faster(best: Option<&str>, time: &RaceTime, parse_failure: &'static str) -> AppResult<String> {
    let Some(best) = best else {
        return Ok(time.as_str().to_string());
    };

    let best_time: RaceTime = best.parse().map_err(|_| AppError::internal(parse_failure))?;
    if *time < best_time {
        Ok(time.as_str().to_string())
    } else {
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::db::memory::{MemoryDatabase, MemoryResultStore, MemoryRunnerStore};

    type MemoryResultService = ResultService<MemoryDatabase, MemoryRunnerStore, MemoryResultStore>;

    fn service(db: &MemoryDatabase) -> MemoryResultService {
        ResultService::new(db.clone(), db.runner_store(), db.result_store())
    }

    async fn runner_with_bests(
        db: &MemoryDatabase,
        personal_best: Option<&str>,
        season_best: Option<&str>,
    ) -> Runner {
        let mut runner = Runner::new("Eliud", "Kipchoge", 39, "Kenya");
        runner.personal_best = personal_best.map(str::to_string);
        runner.season_best = season_best.map(str::to_string);
        db.insert_runner(runner).await
    }

    #[tokio::test]
    async fn test_create_result_validation_messages() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        let year = current_year();

        let cases = [
            (RaceResult::new("", "01:30:00", "Berlin", 1, year), "Invalid runner ID"),
            (RaceResult::new("r1", "", "Berlin", 1, year), "Invalid race result"),
            (RaceResult::new("r1", "01:30:00", "", 1, year), "Invalid location"),
            (RaceResult::new("r1", "01:30:00", "Berlin", -1, year), "Invalid position"),
            (RaceResult::new("r1", "01:30:00", "Berlin", 1, year + 1), "Invalid year"),
            (RaceResult::new("r1", "01.30.00", "Berlin", 1, year), "Invalid race result"),
        ];

        for (result, message) in cases {
            let err = service.create_result(result).await.unwrap_err();
            assert_eq!(err.to_string(), message);
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
        assert!(db.snapshot().await.results.is_empty());
    }

    #[tokio::test]
    async fn test_first_result_sets_personal_best() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, None, None).await;

        let created = service(&db)
            .create_result(RaceResult::new(&runner.id, "01:30:00", "Berlin", 1, current_year()))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:30:00"));
        assert_eq!(runner.season_best.as_deref(), Some("01:30:00"));
    }

    #[tokio::test]
    async fn test_faster_result_replaces_personal_best() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("01:30:00"), None).await;

        service(&db)
            .create_result(RaceResult::new(&runner.id, "01:25:00", "Berlin", 1, 2019))
            .await
            .unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:25:00"));
    }

    #[tokio::test]
    async fn test_slower_result_keeps_personal_best() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("01:30:00"), Some("01:30:00")).await;

        service(&db)
            .create_result(RaceResult::new(&runner.id, "01:40:00", "Berlin", 4, current_year()))
            .await
            .unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:30:00"));
        assert_eq!(runner.season_best.as_deref(), Some("01:30:00"));
    }

    #[tokio::test]
    async fn test_past_year_result_leaves_season_best() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("02:00:00"), Some("02:00:00")).await;

        service(&db)
            .create_result(RaceResult::new(&runner.id, "01:50:00", "Tokyo", 2, current_year() - 1))
            .await
            .unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:50:00"));
        assert_eq!(runner.season_best.as_deref(), Some("02:00:00"));
    }

    #[tokio::test]
    async fn test_current_year_result_improves_season_best() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("01:50:00"), Some("02:00:00")).await;

        service(&db)
            .create_result(RaceResult::new(&runner.id, "01:55:00", "Tokyo", 2, current_year()))
            .await
            .unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:50:00"));
        assert_eq!(runner.season_best.as_deref(), Some("01:55:00"));
    }

    #[tokio::test]
    async fn test_create_result_for_unknown_runner() {
        let db = MemoryDatabase::new();

        let err = service(&db)
            .create_result(RaceResult::new("missing", "01:30:00", "Berlin", 1, 2020))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(db.snapshot().await.results.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_personal_best_is_internal_error() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("fast"), None).await;

        let err = service(&db)
            .create_result(RaceResult::new(&runner.id, "01:30:00", "Berlin", 1, 2020))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to parse personal best");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unparseable_season_best_is_internal_error() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("01:00:00"), Some("1h")).await;

        let err = service(&db)
            .create_result(RaceResult::new(&runner.id, "01:30:00", "Berlin", 1, current_year()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to parse season best");
    }

    #[tokio::test]
    async fn test_create_is_not_atomic_with_runner_update() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, None, None).await;
        db.fail_runner_results_updates(true);

        let err = service(&db)
            .create_result(RaceResult::new(&runner.id, "01:30:00", "Berlin", 1, 2020))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let tables = db.snapshot().await;
        assert_eq!(tables.results.len(), 1);
        assert_eq!(tables.runners[&runner.id].personal_best, None);
    }

    #[tokio::test]
    async fn test_delete_result_requires_id() {
        let db = MemoryDatabase::new();

        let err = service(&db).delete_result("").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid result ID");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_unknown_result() {
        let db = MemoryDatabase::new();

        let err = service(&db).delete_result("missing").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_personal_best_recomputes_minimum() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("01:25:00"), None).await;
        let best = db
            .insert_result(RaceResult::new(&runner.id, "01:25:00", "Berlin", 1, 2018))
            .await;
        db.insert_result(RaceResult::new(&runner.id, "01:40:00", "Paris", 3, 2019))
            .await;
        db.insert_result(RaceResult::new(&runner.id, "01:31:00", "Rome", 2, 2017))
            .await;

        service(&db).delete_result(&best.id).await.unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:31:00"));
        assert!(db.result(&best.id).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_last_result_unsets_bests() {
        let db = MemoryDatabase::new();
        let year = current_year();
        let runner = runner_with_bests(&db, Some("01:25:00"), Some("01:25:00")).await;
        let only = db
            .insert_result(RaceResult::new(&runner.id, "01:25:00", "Berlin", 1, year))
            .await;

        service(&db).delete_result(&only.id).await.unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best, None);
        assert_eq!(runner.season_best, None);
    }

    #[tokio::test]
    async fn test_delete_non_best_result_keeps_bests() {
        let db = MemoryDatabase::new();
        let year = current_year();
        let runner = runner_with_bests(&db, Some("01:25:00"), Some("01:25:00")).await;
        db.insert_result(RaceResult::new(&runner.id, "01:25:00", "Berlin", 1, year))
            .await;
        let slower = db
            .insert_result(RaceResult::new(&runner.id, "01:45:00", "Paris", 5, year))
            .await;

        service(&db).delete_result(&slower.id).await.unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:25:00"));
        assert_eq!(runner.season_best.as_deref(), Some("01:25:00"));
    }

    #[tokio::test]
    async fn test_delete_season_best_recomputes_within_year() {
        let db = MemoryDatabase::new();
        let year = current_year();
        let runner = runner_with_bests(&db, Some("01:20:00"), Some("01:30:00")).await;
        db.insert_result(RaceResult::new(&runner.id, "01:20:00", "Berlin", 1, year - 1))
            .await;
        let season_best = db
            .insert_result(RaceResult::new(&runner.id, "01:30:00", "Paris", 1, year))
            .await;
        db.insert_result(RaceResult::new(&runner.id, "01:35:00", "Rome", 2, year))
            .await;

        service(&db).delete_result(&season_best.id).await.unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:20:00"));
        assert_eq!(runner.season_best.as_deref(), Some("01:35:00"));
    }

    #[tokio::test]
    async fn test_delete_past_year_result_keeps_carried_over_season_best() {
        let db = MemoryDatabase::new();
        let last_year = current_year() - 1;
        let runner = runner_with_bests(&db, Some("01:20:00"), Some("01:30:00")).await;
        db.insert_result(RaceResult::new(&runner.id, "01:20:00", "Berlin", 1, last_year))
            .await;
        let carried = db
            .insert_result(RaceResult::new(&runner.id, "01:30:00", "Paris", 1, last_year))
            .await;

        service(&db).delete_result(&carried.id).await.unwrap();

        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:20:00"));
        assert_eq!(runner.season_best.as_deref(), Some("01:30:00"));
    }

    #[tokio::test]
    async fn test_delete_rolls_back_when_runner_update_fails() {
        let db = MemoryDatabase::new();
        let runner = runner_with_bests(&db, Some("01:25:00"), None).await;
        let best = db
            .insert_result(RaceResult::new(&runner.id, "01:25:00", "Berlin", 1, 2018))
            .await;
        db.insert_result(RaceResult::new(&runner.id, "01:40:00", "Paris", 3, 2019))
            .await;
        db.fail_runner_results_updates(true);

        let err = service(&db).delete_result(&best.id).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(db.result(&best.id).await, Some(best));
        let runner = db.runner(&runner.id).await.unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("01:25:00"));
    }

    #[tokio::test]
    async fn test_delete_with_missing_runner_rolls_back() {
        let db = MemoryDatabase::new();
        let orphan = db
            .insert_result(RaceResult::new("ghost", "01:25:00", "Berlin", 1, 2018))
            .await;

        let err = service(&db).delete_result(&orphan.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Runner not found");
        assert_eq!(db.result(&orphan.id).await, Some(orphan));
    }

    #[test]
    fn test_record_best_times() {
        let mut runner = Runner::new("Paula", "Radcliffe", 50, "UK");
        let time: RaceTime = "02:15:25".parse().unwrap();

        record_best_times(&mut runner, &time, 2003, 2003).unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("02:15:25"));
        assert_eq!(runner.season_best.as_deref(), Some("02:15:25"));

        let slower: RaceTime = "02:17:18".parse().unwrap();
        record_best_times(&mut runner, &slower, 2002, 2003).unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("02:15:25"));
        assert_eq!(runner.season_best.as_deref(), Some("02:15:25"));
    }

    #[test]
    fn test_empty_best_counts_as_unset() {
        let mut runner = Runner::new("Paula", "Radcliffe", 50, "UK");
        runner.personal_best = Some(String::new());
        let time: RaceTime = "02:15:25".parse().unwrap();

        record_best_times(&mut runner, &time, 2000, 2003).unwrap();
        assert_eq!(runner.personal_best.as_deref(), Some("02:15:25"));
        assert_eq!(runner.season_best, None);
    }
}
