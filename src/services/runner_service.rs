//! Runner service

use tracing::info;

use crate::{
    constants::RANKING_LIMIT,
    db::{Database, ResultStore, RunnerStore},
    error::{AppError, AppResult},
    models::Runner,
    utils::{current_year, validate_year_filter},
};

/// Check a runner's descriptive fields, as a bad-request error
pub fn validate_runner(runner: &Runner) -> AppResult<()> {
    crate::utils::validate_runner(runner).map_err(AppError::bad_request)
}

/// Runner service for business logic
pub struct RunnerService<D, R, S> {
    db: D,
    runners: R,
    results: S,
}

impl<D, R, S> RunnerService<D, R, S>
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

    /// Create a runner with no recorded times
    pub async fn create_runner(&self, runner: Runner) -> AppResult<Runner> {
        validate_runner(&runner)?;

        let mut scope = self.db.connection().await?;
        let created = self.runners.create_runner(&mut scope, &runner).await?;

        info!(runner_id = %created.id, "Runner created");
        Ok(created)
    }

    /// Update a runner's name, age and country; best times are left alone
    pub async fn update_runner(&self, runner: Runner) -> AppResult<()> {
        if runner.id.is_empty() {
            return Err(AppError::bad_request("Invalid runner ID"));
        }
        validate_runner(&runner)?;

        let mut scope = self.db.connection().await?;
        self.runners.update_runner(&mut scope, &runner).await?;

        info!(runner_id = %runner.id, "Runner updated");
        Ok(())
    }

    /// Deactivate a runner, keeping their results
    pub async fn delete_runner(&self, runner_id: &str) -> AppResult<()> {
        if runner_id.is_empty() {
            return Err(AppError::bad_request("Invalid runner ID"));
        }

        let mut scope = self.db.connection().await?;
        self.runners.delete_runner(&mut scope, runner_id).await?;

        info!(runner_id = %runner_id, "Runner deleted");
        Ok(())
    }

    /// Get a runner together with all of their results
    pub async fn get_runner(&self, runner_id: &str) -> AppResult<Runner> {
        if runner_id.is_empty() {
            return Err(AppError::bad_request("Invalid runner ID"));
        }

        let mut scope = self.db.connection().await?;
        let mut runner = self
            .runners
            .get_runner(&mut scope, runner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Runner not found"))?;

        runner.results = self
            .results
            .get_all_runner_results(&mut scope, runner_id)
            .await?;
        Ok(runner)
    }

    /// List runners, optionally ranked by country or by a year's best times.
    /// At most one filter may be given; empty filters count as absent.
    pub async fn get_runners_batch(
        &self,
        country: Option<&str>,
        year: Option<&str>,
    ) -> AppResult<Vec<Runner>> {
        let country = country.filter(|country| !country.is_empty());
        let year = year.filter(|year| !year.is_empty());

        if country.is_some() && year.is_some() {
            return Err(AppError::bad_request("Only one parameter can be passed"));
        }
        let year = year
            .map(|year| validate_year_filter(year, current_year()))
            .transpose()
            .map_err(AppError::bad_request)?;

        let mut scope = self.db.connection().await?;
        match (country, year) {
            (Some(country), _) => {
                self.runners
                    .get_runners_by_country(&mut scope, country, RANKING_LIMIT)
                    .await
            }
            (None, Some(year)) => {
                self.runners
                    .get_runners_by_season_best(&mut scope, year, RANKING_LIMIT)
                    .await
            }
            (None, None) => self.runners.get_all_runners(&mut scope).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::{
        db::memory::{MemoryDatabase, MemoryResultStore, MemoryRunnerStore},
        models::RaceResult,
    };

    type MemoryRunnerService = RunnerService<MemoryDatabase, MemoryRunnerStore, MemoryResultStore>;

    fn service(db: &MemoryDatabase) -> MemoryRunnerService {
        RunnerService::new(db.clone(), db.runner_store(), db.result_store())
    }

    fn runner() -> Runner {
        Runner::new("John", "Smith", 30, "United States")
    }

    #[test]
    fn test_validate_runner_messages() {
        let cases = [
            (Runner::new("", "Smith", 30, "United States"), "Invalid first name"),
            (Runner::new("Smith", "", 30, "United States"), "Invalid last name"),
            (Runner::new("Smith", "Smithon", -1, "United States"), "Invalid age"),
            (Runner::new("Smith", "Smithon", 18, ""), "Invalid country"),
        ];

        for (runner, message) in cases {
            let err = validate_runner(&runner).unwrap_err();
            assert_eq!(err.to_string(), message);
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
        assert_ok!(validate_runner(&runner()));
    }

    #[tokio::test]
    async fn test_create_runner_ignores_client_best_times() {
        let db = MemoryDatabase::new();
        let mut runner = runner();
        runner.personal_best = Some("00:01:00".to_string());
        runner.season_best = Some("00:01:00".to_string());

        let created = service(&db).create_runner(runner).await.unwrap();

        assert!(!created.id.is_empty());
        assert!(created.is_active);
        assert_eq!(created.personal_best, None);
        assert_eq!(created.season_best, None);
        assert_eq!(db.runner(&created.id).await, Some(created));
    }

    #[tokio::test]
    async fn test_create_invalid_runner_is_rejected() {
        let db = MemoryDatabase::new();

        let err = service(&db)
            .create_runner(Runner::new("John", "", 30, "Kenya"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid last name");
        assert!(db.snapshot().await.runners.is_empty());
    }

    #[tokio::test]
    async fn test_update_runner() {
        let db = MemoryDatabase::new();
        let mut stored = runner();
        stored.personal_best = Some("02:05:00".to_string());
        let stored = db.insert_runner(stored).await;

        let mut update = Runner::new("Johnny", "Smith", 31, "Canada");
        update.id = stored.id.clone();
        update.personal_best = Some("00:00:01".to_string());
        service(&db).update_runner(update).await.unwrap();

        let runner = db.runner(&stored.id).await.unwrap();
        assert_eq!(runner.first_name, "Johnny");
        assert_eq!(runner.age, 31);
        assert_eq!(runner.country, "Canada");
        assert_eq!(runner.personal_best.as_deref(), Some("02:05:00"));
    }

    #[tokio::test]
    async fn test_update_runner_requires_id() {
        let db = MemoryDatabase::new();

        let err = service(&db).update_runner(runner()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid runner ID");
    }

    #[tokio::test]
    async fn test_update_unknown_runner() {
        let db = MemoryDatabase::new();
        let mut update = runner();
        update.id = "missing".to_string();

        let err = service(&db).update_runner(update).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_runner_deactivates() {
        let db = MemoryDatabase::new();
        let stored = db.insert_runner(runner()).await;
        let service = service(&db);

        assert_ok!(service.delete_runner(&stored.id).await);
        assert!(!db.runner(&stored.id).await.unwrap().is_active);

        let err = service.delete_runner(&stored.id).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_err!(service.delete_runner("").await);
    }

    #[tokio::test]
    async fn test_get_runner_includes_results() {
        let db = MemoryDatabase::new();
        let stored = db.insert_runner(runner()).await;
        db.insert_result(RaceResult::new(&stored.id, "01:40:00", "Boston", 2, 2019))
            .await;
        db.insert_result(RaceResult::new(&stored.id, "01:35:00", "Chicago", 1, 2021))
            .await;

        let runner = service(&db).get_runner(&stored.id).await.unwrap();

        let years: Vec<i32> = runner.results.iter().map(|result| result.year).collect();
        assert_eq!(years, vec![2021, 2019]);
    }

    #[tokio::test]
    async fn test_get_unknown_runner() {
        let db = MemoryDatabase::new();
        let service = service(&db);

        let err = service.get_runner("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Runner not found");

        let err = service.get_runner("").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid runner ID");
    }

    #[tokio::test]
    async fn test_batch_rejects_both_filters() {
        let db = MemoryDatabase::new();

        let err = service(&db)
            .get_runners_batch(Some("Kenya"), Some("2020"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Only one parameter can be passed");
    }

    #[tokio::test]
    async fn test_batch_rejects_invalid_year() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        let next_year = (current_year() + 1).to_string();

        for year in ["twenty", next_year.as_str()] {
            let err = service.get_runners_batch(None, Some(year)).await.unwrap_err();
            assert_eq!(err.to_string(), "Invalid year");
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_batch_by_country_ranks_personal_bests() {
        let db = MemoryDatabase::new();
        for (name, country, best) in [
            ("Slow", "Kenya", "02:10:00"),
            ("Fast", "Kenya", "02:01:09"),
            ("Elsewhere", "Ethiopia", "02:00:00"),
            ("Untimed", "Kenya", ""),
        ] {
            let mut runner = Runner::new(name, "Runner", 25, country);
            runner.personal_best = Some(best.to_string());
            db.insert_runner(runner).await;
        }

        let runners = service(&db)
            .get_runners_batch(Some("Kenya"), Some(""))
            .await
            .unwrap();

        let names: Vec<&str> = runners.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(names, vec!["Fast", "Slow"]);
    }

    #[tokio::test]
    async fn test_batch_by_year_reports_that_years_best() {
        let db = MemoryDatabase::new();
        let a = db.insert_runner(Runner::new("A", "Runner", 25, "Kenya")).await;
        let b = db.insert_runner(Runner::new("B", "Runner", 25, "Kenya")).await;
        let mut retired = Runner::new("C", "Runner", 25, "Kenya");
        retired.is_active = false;
        let retired = db.insert_runner(retired).await;

        for (runner, time, year) in [
            (&a, "02:05:00", 2020),
            (&a, "02:03:00", 2020),
            (&a, "02:00:00", 2021),
            (&b, "02:04:00", 2020),
            (&retired, "01:59:00", 2020),
        ] {
            db.insert_result(RaceResult::new(&runner.id, time, "Berlin", 1, year))
                .await;
        }

        let runners = service(&db).get_runners_batch(None, Some("2020")).await.unwrap();

        let ranking: Vec<(&str, Option<&str>)> = runners
            .iter()
            .map(|r| (r.first_name.as_str(), r.season_best.as_deref()))
            .collect();
        assert_eq!(ranking, vec![("A", Some("02:03:00")), ("B", Some("02:04:00"))]);
    }

    #[tokio::test]
    async fn test_batch_without_filters_lists_active_runners() {
        let db = MemoryDatabase::new();
        db.insert_runner(Runner::new("Zed", "Zulu", 25, "Kenya")).await;
        db.insert_runner(Runner::new("Amy", "Alpha", 25, "Kenya")).await;
        let mut inactive = Runner::new("Old", "Timer", 70, "Kenya");
        inactive.is_active = false;
        db.insert_runner(inactive).await;

        let runners = service(&db).get_runners_batch(None, None).await.unwrap();

        let names: Vec<&str> = runners.iter().map(|r| r.last_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zulu"]);
    }
}
