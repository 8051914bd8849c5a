//! SqliteStorage: owns the connection, applies pragmas and schema on open,
//! implements IStatementStorage.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use banter_core::config::StorageConfig;
use banter_core::conversation::Statement;
use banter_core::errors::BanterResult;
use banter_core::traits::{FilterSpec, IStatementStorage};

use crate::{queries, schema, to_storage_err};

/// Durable statement storage backed by a single SQLite database.
///
/// The connection sits behind a mutex so the storage can be shared across
/// threads behind an `Arc<dyn IStatementStorage>`.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    /// When set, every mutation (update, remove, drop_all) is silently
    /// dropped while still reporting success.
    read_only: bool,
}

impl SqliteStorage {
    /// Open or create a database file at the given path.
    pub fn open(path: impl AsRef<Path>) -> BanterResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn, false)
    }

    /// Open a database file whose contents must not change.
    pub fn open_read_only(path: impl AsRef<Path>) -> BanterResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn, true)
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> BanterResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn, false)
    }

    /// Open at `path` honoring the configured busy timeout and read-only
    /// flag.
    pub fn open_with(path: impl AsRef<Path>, config: &StorageConfig) -> BanterResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        schema::apply_pragmas(&conn)?;
        // After the defaults so the configured value wins.
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)
            .map_err(|e| to_storage_err(e.to_string()))?;
        schema::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            read_only: config.read_only,
        })
    }

    /// Common initialization: pragmas, then idempotent schema.
    fn init(conn: Connection, read_only: bool) -> BanterResult<Self> {
        schema::apply_pragmas(&conn)?;
        schema::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            read_only,
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> BanterResult<T>) -> BanterResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection lock poisoned"))?;
        f(&conn)
    }
}

impl IStatementStorage for SqliteStorage {
    fn count(&self) -> BanterResult<usize> {
        self.with_conn(queries::count_statements)
    }

    fn find(&self, text: &str) -> BanterResult<Option<Statement>> {
        self.with_conn(|conn| queries::find_statement(conn, text))
    }

    fn filter(&self, spec: &FilterSpec) -> BanterResult<Vec<Statement>> {
        self.with_conn(|conn| queries::filter_statements(conn, spec))
    }

    fn update(&self, statement: &Statement) -> BanterResult<()> {
        if self.read_only {
            debug!(text = %statement.text(), "read-only storage, dropping update");
            return Ok(());
        }
        self.with_conn(|conn| queries::update_statement(conn, statement))
    }

    fn get_random(&self) -> BanterResult<Statement> {
        self.with_conn(queries::random_statement)
    }

    fn get_response_statements(&self) -> BanterResult<Vec<Statement>> {
        self.with_conn(queries::response_statements)
    }

    fn remove(&self, text: &str) -> BanterResult<()> {
        if self.read_only {
            debug!(text = %text, "read-only storage, dropping remove");
            return Ok(());
        }
        self.with_conn(|conn| queries::remove_statement(conn, text))
    }

    fn drop_all(&self) -> BanterResult<()> {
        if self.read_only {
            debug!("read-only storage, dropping drop_all");
            return Ok(());
        }
        self.with_conn(queries::drop_all)
    }
}
