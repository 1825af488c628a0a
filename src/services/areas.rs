//! Area repository — persisted polygon rows with a live row feed.
//!
//! DESIGN
//! ======
//! The store never polls: the repository owns a watch channel carrying
//! the full row list and republishes it after every mutation, so every
//! subscriber sees inserts and deletes as they land. Rows keep their
//! points as the encoded JSON string; decoding is the consumer's
//! concern.
//!
//! ERROR HANDLING
//! ==============
//! Mutations surface `AreaStoreError` to the caller; the composing
//! store maps failures to a neutral "no effect" outcome. A delete of an
//! absent id is a successful no-op, not an error.

#[cfg(test)]
#[path = "areas_test.rs"]
mod areas_test;

use sqlx::SqlitePool;
use tokio::sync::watch;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AreaStoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A persisted area row: `(id, name, encoded points)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRecord {
    /// Repository-assigned unique id.
    pub id: i64,
    /// User-chosen area name.
    pub name: String,
    /// Encoded point list (see [`crate::codec`]).
    pub points_json: String,
}

/// Async contract the state store depends on for area persistence.
#[async_trait::async_trait]
pub trait AreaRepository: Send + Sync {
    /// Persist a new row and return its assigned id.
    async fn insert(&self, name: &str, points_json: &str) -> Result<i64, AreaStoreError>;

    /// Remove a row. Removing an absent id succeeds without effect.
    async fn delete(&self, id: i64) -> Result<(), AreaStoreError>;

    /// Subscribe to the live row list. The receiver's current value is
    /// the latest snapshot; each mutation publishes a fresh one.
    fn watch_rows(&self) -> watch::Receiver<Vec<AreaRecord>>;
}

// =============================================================================
// SQLITE IMPLEMENTATION
// =============================================================================

/// SQLite-backed [`AreaRepository`].
pub struct SqliteAreaStore {
    pool: SqlitePool,
    rows_tx: watch::Sender<Vec<AreaRecord>>,
}

impl SqliteAreaStore {
    /// Build the store over an initialized pool (see [`crate::db::init_pool`])
    /// and publish the initial row snapshot.
    ///
    /// # Errors
    ///
    /// Returns a database error if the initial row load fails.
    pub async fn new(pool: SqlitePool) -> Result<Self, AreaStoreError> {
        let rows = fetch_rows(&pool).await?;
        let (rows_tx, _) = watch::channel(rows);
        Ok(Self { pool, rows_tx })
    }

    async fn refresh(&self) -> Result<(), AreaStoreError> {
        let rows = fetch_rows(&self.pool).await?;
        self.rows_tx.send_replace(rows);
        Ok(())
    }
}

#[async_trait::async_trait]
impl AreaRepository for SqliteAreaStore {
    async fn insert(&self, name: &str, points_json: &str) -> Result<i64, AreaStoreError> {
        let result = sqlx::query("INSERT INTO areas (name, points_json) VALUES (?, ?)")
            .bind(name)
            .bind(points_json)
            .execute(&self.pool)
            .await?;
        let id = result.last_insert_rowid();
        self.refresh().await?;
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<(), AreaStoreError> {
        sqlx::query("DELETE FROM areas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.refresh().await?;
        Ok(())
    }

    fn watch_rows(&self) -> watch::Receiver<Vec<AreaRecord>> {
        self.rows_tx.subscribe()
    }
}

async fn fetch_rows(pool: &SqlitePool) -> Result<Vec<AreaRecord>, AreaStoreError> {
    let rows = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, name, points_json FROM areas ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, points_json)| AreaRecord { id, name, points_json })
        .collect())
}
