//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use altolink_domain::{AltoLinkError, Result};
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

/// Database manager that owns the SQLite connection pool.
pub struct DbManager {
    pool: SqlitePool,
    path: PathBuf,
}

impl DbManager {
    /// Open (or create) the database at `db_path` with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")
        });

        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .map_err(map_pool_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.max_size(),
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(map_pool_error)
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the database is reachable and answering queries.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }
}

fn create_schema(conn: &rusqlite::Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        params![SCHEMA_VERSION],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> AltoLinkError {
    AltoLinkError::from(InfraError::from(err))
}

fn map_pool_error(err: r2d2::Error) -> AltoLinkError {
    AltoLinkError::from(InfraError::from(err))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn setup() -> (DbManager, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(&db_path, 2).expect("manager created");
        manager.run_migrations().expect("migrations run");
        (manager, temp_dir)
    }

    #[test]
    fn migrations_create_schema_version() {
        let (manager, _dir) = setup();

        let conn = manager.get_connection().expect("connection acquired");
        let version: i32 =
            conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn migrations_are_idempotent() {
        let (manager, _dir) = setup();
        manager.run_migrations().expect("second run succeeds");
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let (manager, _dir) = setup();
        manager.health_check().expect("health check passed");
    }

    #[test]
    fn enabling_production_without_ref_violates_check() {
        let (manager, _dir) = setup();
        let conn = manager.get_connection().unwrap();

        let err = conn
            .execute(
                "INSERT INTO agencies (id, name, username, created_at, agency_ref, alto_production_enabled)
                 VALUES ('a-1', 'Acme', 'acme', 0, '  ', 1)",
                [],
            )
            .unwrap_err();

        assert!(matches!(map_sql_error(err), AltoLinkError::InvalidInput(_)));
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let (manager, _dir) = setup();
        let conn = manager.get_connection().unwrap();

        let result = conn.execute(
            "INSERT INTO agency_alto_audit
                (id, agency_id, old_value, new_value, old_production_enabled, new_production_enabled, actor, created_at)
             VALUES ('e-1', 'missing', NULL, 'X', 0, 0, 'ops', 0)",
            [],
        );
        assert!(result.is_err());
    }
}
