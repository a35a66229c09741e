//! SQLite HistoryRepository implementation.
//!
//! History rows are denormalized snapshots: the exercise list is stored
//! as a JSON document so a logged workout reads back the same even after
//! the originating split template changes or disappears.

use chrono::{Datelike, NaiveDate};
use sqlx::{Row, SqlitePool};

use crate::db::{
    DayOfWeek, DbError, DbResult, HistoryRepository, Id, LoggedExercise, WorkoutHistory,
};

/// SQLx-backed workout history repository.
pub struct SqliteHistoryRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

/// Weekday of a `YYYY-MM-DD` date, numbered Monday = 0 .. Sunday = 6.
fn weekday_of(date: &str) -> DbResult<DayOfWeek> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| DbError::Validation {
        message: format!("Invalid workout date '{}': {}", date, e),
    })?;
    Ok(parsed.weekday().num_days_from_monday() as DayOfWeek)
}

impl<'a> HistoryRepository for SqliteHistoryRepository<'a> {
    async fn save(
        &self,
        split_id: Id,
        date: &str,
        exercises: &[LoggedExercise],
        use_metric: bool,
    ) -> DbResult<()> {
        let day_of_week = weekday_of(date)?;

        let exercises_json =
            serde_json::to_string(exercises).map_err(|e| DbError::Database {
                message: format!("Failed to serialize exercises: {}", e),
            })?;

        // Last write wins: re-logging a day replaces the earlier snapshot
        // instead of accumulating duplicates.
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        sqlx::query(
            "DELETE FROM workout_history WHERE date = ? AND split_id = ? AND day_of_week = ?",
        )
        .bind(date)
        .bind(split_id)
        .bind(day_of_week)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        sqlx::query(
            "INSERT INTO workout_history (date, split_id, day_of_week, exercises, use_metric)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(date)
        .bind(split_id)
        .bind(day_of_week)
        .bind(exercises_json)
        .bind(use_metric)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        tx.commit().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })
    }

    async fn get(
        &self,
        date: &str,
        split_id: Id,
        day_of_week: DayOfWeek,
    ) -> DbResult<Option<WorkoutHistory>> {
        let row = sqlx::query(
            "SELECT id, date, split_id, day_of_week, exercises, use_metric, created_at
             FROM workout_history WHERE date = ? AND split_id = ? AND day_of_week = ?",
        )
        .bind(date)
        .bind(split_id)
        .bind(day_of_week)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let exercises_json: String = row.get("exercises");
        let exercises: Vec<LoggedExercise> =
            serde_json::from_str(&exercises_json).map_err(|e| DbError::Database {
                message: format!("Failed to parse exercises JSON: {}", e),
            })?;

        Ok(Some(WorkoutHistory {
            id: row.get("id"),
            date: row.get("date"),
            split_id: row.get("split_id"),
            day_of_week: row.get("day_of_week"),
            exercises,
            use_metric: row.get("use_metric"),
            created_at: row.get("created_at"),
        }))
    }

    async fn clear(&self) -> DbResult<()> {
        sqlx::query("DELETE FROM workout_history")
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;
        Ok(())
    }
}
