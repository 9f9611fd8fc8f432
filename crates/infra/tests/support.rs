use std::io;
use std::sync::{Arc, Mutex};

use altolink_domain::Agency;
use altolink_infra::database::{DbManager, SqliteAgencyRepository};
use tempfile::TempDir;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    pub fn repository(&self) -> Arc<SqliteAgencyRepository> {
        Arc::new(SqliteAgencyRepository::new(Arc::clone(&self.manager)))
    }

    /// Execute a batch of SQL statements against the database.
    #[allow(dead_code)]
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Agency with the given Alto settings.
pub fn agency(id: &str, agency_ref: Option<&str>, enabled: bool) -> Agency {
    Agency {
        agency_ref: agency_ref.map(str::to_string),
        alto_production_enabled: enabled,
        ..Agency::new(id, format!("Agency {id}"), id)
    }
}

/// Handle for inspecting formatted tracing output captured during a test.
#[allow(dead_code)]
pub struct LogHandle {
    buffer: Arc<Mutex<Vec<u8>>>,
    _guard: DefaultGuard,
}

#[allow(dead_code)]
impl LogHandle {
    /// All captured output as text.
    pub fn output(&self) -> String {
        let guard = self.buffer.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output().contains(needle)
    }
}

#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.0.lock().expect("log mutex poisoned");
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture tracing output on the current thread until the handle drops.
///
/// Use with a current-thread runtime so spawned work logs to the same
/// subscriber.
#[allow(dead_code)]
pub fn capture_logs() -> LogHandle {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_writer(BufferWriter(Arc::clone(&buffer)))
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    LogHandle { buffer, _guard: tracing::subscriber::set_default(subscriber) }
}
