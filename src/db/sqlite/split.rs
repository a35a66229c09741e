//! SQLite SplitRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::{
    DayExercise, DayOfWeek, DayWithExercises, DbError, DbResult, Id, Split, SplitRepository,
    SplitWithDays,
};

/// SQLx-backed split repository.
pub struct SqliteSplitRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SplitRepository for SqliteSplitRepository<'a> {
    async fn add(&self, name: &str) -> DbResult<Id> {
        // Rank assignment and insert must see the same max, so both run
        // in one transaction.
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let next_order: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(order_index), 0) + 1 FROM splits")
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;

        let result = sqlx::query("INSERT INTO splits (name, order_index) VALUES (?, ?)")
            .bind(name)
            .bind(next_order)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        tx.commit().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: Id, name: &str, is_favorite: bool) -> DbResult<bool> {
        let result = sqlx::query("UPDATE splits SET name = ?, is_favorite = ? WHERE id = ?")
            .bind(name)
            .bind(is_favorite)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_default(&self, id: Id, is_default: bool) -> DbResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let exists: Option<Id> = sqlx::query_scalar("SELECT id FROM splits WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;
        if exists.is_none() {
            return Ok(false);
        }

        if is_default {
            // Single-default invariant: clear every other flag before
            // setting this one.
            sqlx::query("UPDATE splits SET is_default = 0 WHERE id != ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;
        } else {
            let default_ids: Vec<Id> =
                sqlx::query_scalar("SELECT id FROM splits WHERE is_default = 1")
                    .fetch_all(&mut *tx)
                    .await
                    .map_err(|e| DbError::Database {
                        message: e.to_string(),
                    })?;

            // Unsetting the only default needs a replacement first, or
            // the table would be left with zero defaults.
            if default_ids == [id] {
                let other: Option<Id> =
                    sqlx::query_scalar("SELECT id FROM splits WHERE id != ? LIMIT 1")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(|e| DbError::Database {
                            message: e.to_string(),
                        })?;

                let Some(other) = other else {
                    return Err(DbError::Constraint {
                        message: "cannot unset the only default split".to_string(),
                    });
                };

                sqlx::query("UPDATE splits SET is_default = 1 WHERE id = ?")
                    .bind(other)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| DbError::Database {
                        message: e.to_string(),
                    })?;
            }
        }

        let result = sqlx::query("UPDATE splits SET is_default = ? WHERE id = ?")
            .bind(is_default)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        tx.commit().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_favorite(&self, id: Id) -> DbResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let current: Option<bool> = sqlx::query_scalar("SELECT is_favorite FROM splits WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let Some(is_favorite) = current else {
            return Ok(false);
        };

        if is_favorite {
            // Already the favorite: just unfavorite it. Zero favorites is
            // a legal state.
            sqlx::query("UPDATE splits SET is_favorite = 0 WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;
        } else {
            sqlx::query("UPDATE splits SET is_favorite = 0")
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;
            sqlx::query("UPDATE splits SET is_favorite = 1 WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;
        }

        tx.commit().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(true)
    }

    async fn delete(&self, id: Id) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM splits WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_order(&self, id: Id, order: i64) -> DbResult<bool> {
        let result = sqlx::query("UPDATE splits SET order_index = ? WHERE id = ?")
            .bind(order)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> DbResult<Vec<Split>> {
        let rows = sqlx::query(
            "SELECT id, name, order_index, is_favorite, is_default, created_at
             FROM splits ORDER BY order_index ASC, created_at DESC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(rows.iter().map(row_to_split).collect())
    }

    async fn get_favorite(&self) -> DbResult<Option<Split>> {
        let row = sqlx::query(
            "SELECT id, name, order_index, is_favorite, is_default, created_at
             FROM splits WHERE is_favorite = 1",
        )
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(row.as_ref().map(row_to_split))
    }

    async fn get_default(&self) -> DbResult<Option<Split>> {
        let row = sqlx::query(
            "SELECT id, name, order_index, is_favorite, is_default, created_at
             FROM splits WHERE is_default = 1",
        )
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(row.as_ref().map(row_to_split))
    }

    async fn get_with_days(&self, id: Id) -> DbResult<SplitWithDays> {
        let split_row = sqlx::query(
            "SELECT id, name, order_index, is_favorite, is_default, created_at
             FROM splits WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let split_row = split_row.ok_or(DbError::NotFound {
            entity_type: "Split".to_string(),
            id: id.to_string(),
        })?;

        let split = row_to_split(&split_row);

        // One join-based fetch for the whole tree; rows arrive grouped by
        // day, exercises in order within each day.
        let rows = sqlx::query(
            "SELECT
                sd.id AS day_id, sd.day_of_week, sd.name AS day_name,
                sde.id AS entry_id, e.name AS exercise_name,
                sde.order_index AS exercise_order
             FROM split_days sd
             LEFT JOIN split_day_exercises sde ON sd.id = sde.split_day_id
             LEFT JOIN exercises e ON sde.exercise_id = e.id
             WHERE sd.split_id = ?
             ORDER BY sd.day_of_week, sde.order_index",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let mut days: Vec<DayWithExercises> = Vec::new();
        for row in &rows {
            let day_id: Id = row.get("day_id");
            if days.last().map(|d| d.id) != Some(day_id) {
                days.push(DayWithExercises {
                    id: day_id,
                    day_of_week: row.get("day_of_week"),
                    name: row.get("day_name"),
                    exercises: Vec::new(),
                });
            }
            // LEFT JOIN leaves the entry columns NULL for days without
            // exercises.
            let entry_id: Option<Id> = row.get("entry_id");
            if let Some(entry_id) = entry_id {
                let day = days.last_mut().expect("day pushed above");
                day.exercises.push(DayExercise {
                    id: entry_id,
                    name: row.get("exercise_name"),
                    order_index: row.get("exercise_order"),
                });
            }
        }

        Ok(SplitWithDays {
            id: split.id,
            name: split.name,
            order_index: split.order_index,
            is_favorite: split.is_favorite,
            is_default: split.is_default,
            created_at: split.created_at,
            days,
        })
    }

    async fn add_day(&self, split_id: Id, day_of_week: DayOfWeek, name: &str) -> DbResult<Id> {
        let result =
            sqlx::query("INSERT INTO split_days (split_id, day_of_week, name) VALUES (?, ?, ?)")
                .bind(split_id)
                .bind(day_of_week)
                .bind(name)
                .execute(self.pool)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;

        Ok(result.last_insert_rowid())
    }

    async fn update_day(&self, id: Id, day_of_week: DayOfWeek, name: &str) -> DbResult<bool> {
        let result = sqlx::query("UPDATE split_days SET day_of_week = ?, name = ? WHERE id = ?")
            .bind(day_of_week)
            .bind(name)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_day(&self, id: Id) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM split_days WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_day_exercise(&self, split_day_id: Id, name: &str, order: i64) -> DbResult<Id> {
        // Each day entry owns a freshly created exercise row; entries with
        // the same name stay independently editable and deletable.
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let exercise = sqlx::query("INSERT INTO exercises (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let result = sqlx::query(
            "INSERT INTO split_day_exercises (split_day_id, exercise_id, order_index)
             VALUES (?, ?, ?)",
        )
        .bind(split_day_id)
        .bind(exercise.last_insert_rowid())
        .bind(order)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        tx.commit().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn update_day_exercise(&self, id: Id, name: &str, order: i64) -> DbResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let exercise_id: Option<Id> =
            sqlx::query_scalar("SELECT exercise_id FROM split_day_exercises WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;

        let Some(exercise_id) = exercise_id else {
            return Ok(false);
        };

        sqlx::query("UPDATE exercises SET name = ? WHERE id = ?")
            .bind(name)
            .bind(exercise_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let result = sqlx::query("UPDATE split_day_exercises SET order_index = ? WHERE id = ?")
            .bind(order)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        tx.commit().await.map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_day_exercise(&self, id: Id) -> DbResult<bool> {
        // Join row only; the exercise row it points at is left behind.
        let result = sqlx::query("DELETE FROM split_day_exercises WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_split(row: &SqliteRow) -> Split {
    Split {
        id: row.get("id"),
        name: row.get("name"),
        order_index: row.get("order_index"),
        is_favorite: row.get("is_favorite"),
        is_default: row.get("is_default"),
        created_at: row.get("created_at"),
    }
}
