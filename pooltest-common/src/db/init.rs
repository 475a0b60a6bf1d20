//! Database initialization
//!
//! Opens (or creates) the SQLite file and makes sure the `water_tests`
//! table exists before the service accepts requests.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Name of the single table holding measurements
pub const WATER_TESTS_TABLE: &str = "water_tests";

/// Initialize database connection and create the table if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // WAL lets listing queries run while an insert holds the write lock.
    // Both settings are per connection, so they go on the connect options.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    if table_exists(&pool).await? {
        let count = count_readings(&pool).await?;
        info!(readings_count = count, "water_tests table already exists");
    } else {
        create_water_tests_table(&pool).await?;
        info!("water_tests table was created");
    }

    Ok(pool)
}

/// Check `sqlite_master` for the measurements table
pub async fn table_exists(pool: &SqlitePool) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(WATER_TESTS_TABLE)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Create the water_tests table
///
/// `AUTOINCREMENT` keeps ids from being reused even after the newest row
/// is removed by hand.
pub async fn create_water_tests_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS water_tests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            testDate TEXT NOT NULL,
            chlorine REAL NOT NULL,
            ph REAL NOT NULL,
            acidDemand INTEGER,
            totalAlkalinity INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Number of stored readings
pub async fn count_readings(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM water_tests")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
