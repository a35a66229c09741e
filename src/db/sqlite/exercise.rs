//! SQLite ExerciseRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::{DbError, DbResult, Exercise, ExerciseRepository, Id};

/// SQLx-backed exercise repository.
pub struct SqliteExerciseRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ExerciseRepository for SqliteExerciseRepository<'a> {
    async fn add(&self, name: &str) -> DbResult<Id> {
        let result = sqlx::query("INSERT INTO exercises (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self) -> DbResult<Vec<Exercise>> {
        let rows = sqlx::query("SELECT id, name, collection_id, created_at FROM exercises")
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(rows
            .iter()
            .map(|row| Exercise {
                id: row.get("id"),
                name: row.get("name"),
                collection_id: row.get("collection_id"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn update(&self, id: Id, name: &str) -> DbResult<bool> {
        let result = sqlx::query("UPDATE exercises SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Id) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
