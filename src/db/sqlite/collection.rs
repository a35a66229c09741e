//! SQLite collection repositories.
//!
//! Two separately-scoped folder entities: `collections` group exercises,
//! `split_collections` group splits. Same CRUD surface, independent
//! lifecycles.

use sqlx::{Row, SqlitePool};

use crate::db::{
    Collection, CollectionRepository, DbError, DbResult, Id, SplitCollection,
    SplitCollectionRepository,
};

/// SQLx-backed exercise collection repository.
pub struct SqliteCollectionRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> CollectionRepository for SqliteCollectionRepository<'a> {
    async fn add(&self, name: &str) -> DbResult<Id> {
        let result = sqlx::query("INSERT INTO collections (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self) -> DbResult<Vec<Collection>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM collections")
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(rows
            .iter()
            .map(|row| Collection {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn update(&self, id: Id, name: &str) -> DbResult<bool> {
        let result = sqlx::query("UPDATE collections SET name = ? WHERE id = ?")
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
        // ON DELETE SET NULL unlinks member exercises; they are never
        // deleted with their collection.
        let result = sqlx::query("DELETE FROM collections WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// SQLx-backed split collection repository.
pub struct SqliteSplitCollectionRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SplitCollectionRepository for SqliteSplitCollectionRepository<'a> {
    async fn add(&self, name: &str) -> DbResult<Id> {
        let result = sqlx::query("INSERT INTO split_collections (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self) -> DbResult<Vec<SplitCollection>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM split_collections")
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(rows
            .iter()
            .map(|row| SplitCollection {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn update(&self, id: Id, name: &str) -> DbResult<bool> {
        let result = sqlx::query("UPDATE split_collections SET name = ? WHERE id = ?")
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
        let result = sqlx::query("DELETE FROM split_collections WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
