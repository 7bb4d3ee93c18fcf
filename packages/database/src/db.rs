//! Database connection utilities.

use std::path::{Path, PathBuf};

use switchy_database::Database;
use switchy_database_connection::init_sqlite_rusqlite;

use crate::DbError;

/// Default location of the traffic database, relative to the working
/// directory.
pub const DEFAULT_DB_PATH: &str = "data/traffic.db";

/// Resolves the database path from the `DATABASE_PATH` environment
/// variable, falling back to [`DEFAULT_DB_PATH`].
#[must_use]
pub fn db_path_from_env() -> PathBuf {
    std::env::var("DATABASE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from)
}

/// Opens the database named by `DATABASE_PATH` and ensures the schema
/// exists.
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened or schema creation
/// fails.
pub async fn connect_from_env() -> Result<Box<dyn Database>, DbError> {
    open_db(&db_path_from_env()).await
}

/// Opens (or creates) the `SQLite` database at `path` and ensures the
/// schema exists.
///
/// # Errors
///
/// Returns [`DbError`] if the parent directory cannot be created, the
/// database cannot be opened, or schema creation fails.
pub async fn open_db(path: &Path) -> Result<Box<dyn Database>, DbError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    log::info!("Opening traffic database at {}", path.display());
    let db = init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Connection(e.to_string()))?;

    ensure_schema(db.as_ref()).await?;

    Ok(db)
}

/// Creates all tables and indexes if they don't already exist.
async fn ensure_schema(db: &dyn Database) -> Result<(), DbError> {
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS intersections (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            latitude    REAL NOT NULL,
            longitude   REAL NOT NULL
        )",
    )
    .await?;

    // Dates and times are zero-padded ISO text, so string order is
    // chronological order.
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS traffic_volumes (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            intersection_id INTEGER NOT NULL REFERENCES intersections(id) ON DELETE CASCADE,
            date            TEXT NOT NULL,
            time            TEXT NOT NULL,
            volume_north    INTEGER NOT NULL DEFAULT 0,
            volume_south    INTEGER NOT NULL DEFAULT 0,
            volume_east     INTEGER NOT NULL DEFAULT 0,
            volume_west     INTEGER NOT NULL DEFAULT 0
        )",
    )
    .await?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_traffic_volumes_intersection
         ON traffic_volumes (intersection_id, date, time)",
    )
    .await?;

    db.exec_raw("CREATE INDEX IF NOT EXISTS idx_traffic_volumes_date ON traffic_volumes (date)")
        .await?;

    // SQLite leaves foreign key enforcement off unless asked.
    db.exec_raw("PRAGMA foreign_keys = ON").await?;

    log::debug!("Traffic schema is up to date");

    Ok(())
}
