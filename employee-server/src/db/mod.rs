//! Database Module
//!
//! Handles the SQLite connection pool, schema bootstrap and seeding

pub mod models;
pub mod repository;
pub mod seed;

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if needed) the database file, ensure the schema and seed demo rows.
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        if let Some(dir) = db_path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::database(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // 写冲突时等待 5s 而非立即失败
            .busy_timeout(Duration::from_secs(5))
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(path = %db_path.display(), "Database connection established (SQLite WAL)");

        Self::bootstrap(pool).await
    }

    /// Private in-memory database, seeded like a fresh file.
    pub async fn in_memory() -> Result<Self, AppError> {
        let pool = memory_pool()
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::bootstrap(pool).await
    }

    async fn bootstrap(pool: SqlitePool) -> Result<Self, AppError> {
        seed::ensure_schema(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create schema: {e}")))?;
        seed::seed_if_empty(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed database: {e}")))?;
        Ok(Self { pool })
    }

    /// Close every pooled connection; waits for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}

/// Single-connection pool over `:memory:`.
///
/// Every SQLite connection to `:memory:` is its own database, so the pool
/// is pinned to one connection that never expires.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Remove the database file together with its WAL side files.
///
/// Returns the paths that existed and were removed.
pub fn remove_database_files(db_path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for suffix in ["", "-wal", "-shm"] {
        let mut name = db_path.as_os_str().to_owned();
        name.push(suffix);
        let path = PathBuf::from(name);
        match std::fs::remove_file(&path) {
            Ok(()) => removed.push(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(removed)
}
