//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::{
    SqliteCollectionRepository, SqliteExerciseRepository, SqliteHistoryRepository,
    SqliteSplitCollectionRepository, SqliteSplitRepository,
};
use crate::db::{Database, DbError, DbResult};

// Baseline DDL from data/sql/sqlite/, embedded at compile time.
const SCHEMA_SQL: &str = include_str!("../../../data/sql/sqlite/schema.sql");

/// Tables owned by the schema manager, children before parents so reset
/// can drop them in order.
const MANAGED_TABLES: &[&str] = &[
    "split_day_exercises",
    "split_days",
    "workout_history",
    "exercises",
    "splits",
    "split_collections",
    "collections",
];

/// SQLite database implementation.
///
/// Owns the connection pool; repositories borrow it. Construct once at
/// application start and pass by reference wherever data access is needed.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database at the given path, creating the file if missing.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        Self::with_options(options).await
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);
        Self::with_options(options).await
    }

    async fn with_options(options: SqliteConnectOptions) -> DbResult<Self> {
        // Single-writer model: the app is the only process touching the
        // file, and one connection keeps in-memory databases coherent.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        Ok(Self { pool })
    }

    /// Access the underlying pool, for advanced queries and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Column names of a table per `PRAGMA table_info`. Empty when the
    /// table does not exist.
    async fn table_columns(&self, table: &str) -> DbResult<Vec<String>> {
        let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;
        Ok(rows.iter().map(|row| row.get("name")).collect())
    }

    /// Add a column to a live table when an older schema version lacks it.
    /// Returns whether the column was added.
    async fn add_column_if_missing(
        &self,
        table: &str,
        column: &str,
        definition: &str,
    ) -> DbResult<bool> {
        let columns = self.table_columns(table).await?;
        if columns.iter().any(|c| c == column) {
            return Ok(false);
        }

        info!("Adding column {}.{} to legacy schema", table, column);
        sqlx::query(&format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            table, column, definition
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::Migration {
            message: format!("Failed to add {}.{}: {}", table, column, e),
        })?;
        Ok(true)
    }

    /// Additive migrations for databases created before the ordering,
    /// favorite and default columns existed. Safe to run on a database
    /// that already has the target schema.
    async fn migrate_columns(&self) -> DbResult<()> {
        let order_added = self
            .add_column_if_missing("splits", "order_index", "INTEGER NOT NULL DEFAULT 0")
            .await?;
        if order_added {
            // Legacy rows get ranks by creation time, id as tiebreak.
            sqlx::query(
                "UPDATE splits SET order_index = (
                    SELECT COUNT(*) + 1 FROM splits AS earlier
                    WHERE earlier.created_at < splits.created_at
                       OR (earlier.created_at = splits.created_at
                           AND earlier.id < splits.id)
                )",
            )
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Failed to backfill splits.order_index: {}", e),
            })?;
        }

        self.add_column_if_missing("splits", "is_favorite", "INTEGER NOT NULL DEFAULT 0")
            .await?;

        let default_added = self
            .add_column_if_missing("splits", "is_default", "INTEGER NOT NULL DEFAULT 0")
            .await?;
        if default_added {
            // A freshly added flag means no split is default yet; the
            // earliest-created one takes the role.
            sqlx::query(
                "UPDATE splits SET is_default = 1 WHERE id =
                    (SELECT id FROM splits ORDER BY created_at ASC, id ASC LIMIT 1)",
            )
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Failed to designate default split: {}", e),
            })?;
        }

        self.add_column_if_missing("workout_history", "use_metric", "INTEGER NOT NULL DEFAULT 1")
            .await?;

        Ok(())
    }
}

/// Split an SQL script into executable statements, dropping comment lines.
fn schema_statements(sql: &str) -> Vec<String> {
    sql.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("--")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Database for SqliteDatabase {
    type Splits<'a> = SqliteSplitRepository<'a>;
    type Collections<'a> = SqliteCollectionRepository<'a>;
    type SplitCollections<'a> = SqliteSplitCollectionRepository<'a>;
    type Exercises<'a> = SqliteExerciseRepository<'a>;
    type History<'a> = SqliteHistoryRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        for statement in schema_statements(SCHEMA_SQL) {
            debug!("Applying schema statement: {}", statement);
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DbError::Migration {
                    message: format!("Failed to execute schema statement: {} - {}", statement, e),
                })?;
        }

        self.migrate_columns().await?;
        debug!("Schema is up to date");
        Ok(())
    }

    async fn reset(&self) -> DbResult<()> {
        info!("Resetting database: dropping all managed tables");

        // Foreign keys off so drop order mistakes cannot abort the reset.
        // A failure partway through leaves a partial schema; migrate()
        // below rebuilds whatever is missing, and an error here is fatal
        // to the caller either way.
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        let mut drop_result = Ok(());
        for table in MANAGED_TABLES {
            if let Err(e) = sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&self.pool)
                .await
            {
                drop_result = Err(DbError::Migration {
                    message: format!("Failed to drop {}: {}", table, e),
                });
                break;
            }
        }

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        drop_result?;
        self.migrate().await
    }

    fn splits(&self) -> Self::Splits<'_> {
        SqliteSplitRepository { pool: &self.pool }
    }

    fn collections(&self) -> Self::Collections<'_> {
        SqliteCollectionRepository { pool: &self.pool }
    }

    fn split_collections(&self) -> Self::SplitCollections<'_> {
        SqliteSplitCollectionRepository { pool: &self.pool }
    }

    fn exercises(&self) -> Self::Exercises<'_> {
        SqliteExerciseRepository { pool: &self.pool }
    }

    fn history(&self) -> Self::History<'_> {
        SqliteHistoryRepository { pool: &self.pool }
    }
}
