//! Runner repository

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{PgScope, RunnerStore},
    error::{AppError, AppResult},
    models::Runner,
};

/// Repository for runner database operations
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerRepository;

#[async_trait]
impl RunnerStore for RunnerRepository {
    type Scope = PgScope;

    async fn create_runner(&self, scope: &mut PgScope, runner: &Runner) -> AppResult<Runner> {
        let runner = sqlx::query_as::<_, Runner>(
            r#"
            INSERT INTO runners (id, first_name, last_name, age, is_active, country)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&runner.first_name)
        .bind(&runner.last_name)
        .bind(runner.age)
        .bind(&runner.country)
        .fetch_one(scope.conn())
        .await?;

        Ok(runner)
    }

    async fn update_runner(&self, scope: &mut PgScope, runner: &Runner) -> AppResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE runners
            SET first_name = $2, last_name = $3, age = $4, country = $5
            WHERE id = $1 AND is_active
            "#,
        )
        .bind(&runner.id)
        .bind(&runner.first_name)
        .bind(&runner.last_name)
        .bind(runner.age)
        .bind(&runner.country)
        .execute(scope.conn())
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Runner not found"));
        }
        Ok(())
    }

    async fn update_runner_results(&self, scope: &mut PgScope, runner: &Runner) -> AppResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE runners
            SET personal_best = $2, season_best = $3
            WHERE id = $1
            "#,
        )
        .bind(&runner.id)
        .bind(&runner.personal_best)
        .bind(&runner.season_best)
        .execute(scope.conn())
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Runner not found"));
        }
        Ok(())
    }

    async fn delete_runner(&self, scope: &mut PgScope, id: &str) -> AppResult<()> {
        let deleted = sqlx::query(r#"UPDATE runners SET is_active = FALSE WHERE id = $1 AND is_active"#)
            .bind(id)
            .execute(scope.conn())
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Runner not found"));
        }
        Ok(())
    }

    async fn get_runner(&self, scope: &mut PgScope, id: &str) -> AppResult<Option<Runner>> {
        let runner = sqlx::query_as::<_, Runner>(r#"SELECT * FROM runners WHERE id = $1"#)
            .bind(id)
            .fetch_optional(scope.conn())
            .await?;

        Ok(runner)
    }

    async fn get_all_runners(&self, scope: &mut PgScope) -> AppResult<Vec<Runner>> {
        let runners = sqlx::query_as::<_, Runner>(
            r#"SELECT * FROM runners WHERE is_active ORDER BY last_name, first_name"#,
        )
        .fetch_all(scope.conn())
        .await?;

        Ok(runners)
    }

    async fn get_runners_by_country(
        &self,
        scope: &mut PgScope,
        country: &str,
        limit: i64,
    ) -> AppResult<Vec<Runner>> {
        let runners = sqlx::query_as::<_, Runner>(
            r#"
            SELECT * FROM runners
            WHERE country = $1 AND is_active AND personal_best IS NOT NULL AND personal_best <> ''
            ORDER BY personal_best::interval
            LIMIT $2
            "#,
        )
        .bind(country)
        .bind(limit)
        .fetch_all(scope.conn())
        .await?;

        Ok(runners)
    }

    async fn get_runners_by_season_best(
        &self,
        scope: &mut PgScope,
        year: i32,
        limit: i64,
    ) -> AppResult<Vec<Runner>> {
        let runners = sqlx::query_as::<_, Runner>(
            r#"
            SELECT
                r.id, r.first_name, r.last_name, r.age, r.is_active, r.country,
                r.personal_best, best.race_result AS season_best
            FROM runners r
            JOIN (
                SELECT DISTINCT ON (runner_id) runner_id, race_result
                FROM results
                WHERE year = $1
                ORDER BY runner_id, race_result::interval
            ) best ON best.runner_id = r.id
            WHERE r.is_active
            ORDER BY best.race_result::interval
            LIMIT $2
            "#,
        )
        .bind(year)
        .bind(limit)
        .fetch_all(scope.conn())
        .await?;

        Ok(runners)
    }
}
