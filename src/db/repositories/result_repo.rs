//! Race result repository

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{PgScope, ResultStore},
    error::{AppError, AppResult},
    models::RaceResult,
};

/// Repository for race result database operations
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRepository;

#[async_trait]
impl ResultStore for ResultRepository {
    type Scope = PgScope;

    async fn create_result(&self, scope: &mut PgScope, result: &RaceResult) -> AppResult<RaceResult> {
        let result = sqlx::query_as::<_, RaceResult>(
            r#"
            INSERT INTO results (id, runner_id, race_result, location, position, year)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&result.runner_id)
        .bind(&result.race_result)
        .bind(&result.location)
        .bind(result.position)
        .bind(result.year)
        .fetch_one(scope.conn())
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("Runner not found")
            }
            other => other.into(),
        })?;

        Ok(result)
    }

    async fn delete_result(&self, scope: &mut PgScope, id: &str) -> AppResult<RaceResult> {
        sqlx::query_as::<_, RaceResult>(r#"DELETE FROM results WHERE id = $1 RETURNING *"#)
            .bind(id)
            .fetch_optional(scope.conn())
            .await?
            .ok_or_else(|| AppError::not_found("Result not found"))
    }

    async fn get_all_runner_results(
        &self,
        scope: &mut PgScope,
        runner_id: &str,
    ) -> AppResult<Vec<RaceResult>> {
        let results = sqlx::query_as::<_, RaceResult>(
            r#"
            SELECT * FROM results
            WHERE runner_id = $1
            ORDER BY year DESC, race_result::interval
            "#,
        )
        .bind(runner_id)
        .fetch_all(scope.conn())
        .await?;

        Ok(results)
    }

    async fn get_personal_best_results(
        &self,
        scope: &mut PgScope,
        runner_id: &str,
    ) -> AppResult<Option<String>> {
        let best: Option<String> = sqlx::query_scalar(
            r#"
            SELECT race_result FROM results
            WHERE runner_id = $1
            ORDER BY race_result::interval
            LIMIT 1
            "#,
        )
        .bind(runner_id)
        .fetch_optional(scope.conn())
        .await?;

        Ok(best)
    }

    async fn get_season_best_results(
        &self,
        scope: &mut PgScope,
        runner_id: &str,
        year: i32,
    ) -> AppResult<Option<String>> {
        let best: Option<String> = sqlx::query_scalar(
            r#"
            SELECT race_result FROM results
            WHERE runner_id = $1 AND year = $2
            ORDER BY race_result::interval
            LIMIT 1
            "#,
        )
        .bind(runner_id)
        .bind(year)
        .fetch_optional(scope.conn())
        .await?;

        Ok(best)
    }
}
