//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use finswitch_domain::{FinSwitchError, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::info;

use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

pub type SqlitePool = Pool<SqliteConnectionManager>;
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Owns the connection pool used by the SQLite repositories.
pub struct DbManager {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl DbManager {
    /// Open (or create) a file-backed database with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let manager = SqliteConnectionManager::file(&path)
            .with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));

        let pool = build_pool(manager, pool_size.max(1))?;

        info!(db_path = %path.display(), max_connections = pool.max_size(), "sqlite pool initialised");

        Ok(Self { pool, path: Some(path) })
    }

    /// Single-connection in-memory database; the data lives as long as the pool.
    pub fn in_memory() -> Result<Self> {
        let pool = build_pool(SqliteConnectionManager::memory(), 1)?;
        Ok(Self { pool, path: None })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(|e| FinSwitchError::from(InfraError::from(e)))
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }

    /// Database file path; `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Acquire a connection and run a trivial query.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32) -> Result<SqlitePool> {
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)
        .map_err(|e| FinSwitchError::from(InfraError::from(e)))
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> FinSwitchError {
    FinSwitchError::from(InfraError::from(err))
}

/// Map a `spawn_blocking` join failure.
pub(crate) fn map_join_error(err: tokio::task::JoinError) -> FinSwitchError {
    if err.is_cancelled() {
        FinSwitchError::Internal("blocking task cancelled".into())
    } else {
        FinSwitchError::Internal(format!("blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn migrations_create_schema_version() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("finswitch.db");

        let manager = DbManager::new(&db_path, 4).expect("manager created");
        manager.run_migrations().expect("migrations run");

        let conn = manager.get_connection().expect("connection acquired");
        let version: i32 =
            conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
        assert_eq!(manager.path(), Some(db_path.as_path()));
    }

    #[test]
    fn migrations_are_idempotent() {
        let manager = DbManager::in_memory().expect("manager created");
        manager.run_migrations().expect("first run");
        manager.run_migrations().expect("second run");

        let conn = manager.get_connection().expect("connection acquired");
        let count: i32 =
            conn.query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let manager = DbManager::in_memory().expect("manager created");
        manager.health_check().expect("health check passed");
        assert!(manager.path().is_none());
    }
}
