//! Database initialization and migration runner.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Initialize the SQLite connection pool and run migrations.
///
/// `database_url` is a sqlx SQLite URL, e.g. `sqlite://areas.db?mode=rwc`
/// or `sqlite::memory:` for an ephemeral store.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // In-memory SQLite gives every pooled connection its own database;
    // a single connection keeps the store coherent either way.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
