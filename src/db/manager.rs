//! Database manager implementation
//!
//! This module provides read-only access to the reference store with:
//! - SQLite connection pool using r2d2, checking connection liveness on checkout
//! - Async wrapper running queries on the blocking thread pool
//! - Connection-string parsing for the injected `database.url`
//! - Registration of the `casefold` SQL function used for matching

use crate::core::config::DatabaseConfig;
use crate::core::error::{AppError, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task;

/// Where the store lives, parsed from a connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Private in-memory database
    Memory,
    /// Database file on disk
    File(PathBuf),
    /// SQLite `file:` URI, passed through untouched
    Uri(String),
}

impl DatabaseTarget {
    /// Parse `sqlite://<path>`, `sqlite:<path>`, `sqlite::memory:`, `file:` URIs or a bare path
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();

        if url.is_empty() {
            return Err(AppError::ConfigError("database url cannot be empty".to_string()));
        }

        if matches!(url, ":memory:" | "sqlite::memory:" | "sqlite://:memory:") {
            return Ok(DatabaseTarget::Memory);
        }

        if url.starts_with("file:") {
            return Ok(DatabaseTarget::Uri(url.to_string()));
        }

        if let Some(path) = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
        {
            if path.is_empty() {
                return Err(AppError::ConfigError(
                    "database url is missing a path".to_string(),
                ));
            }
            return Ok(DatabaseTarget::File(PathBuf::from(path)));
        }

        if let Some((scheme, _)) = url.split_once("://") {
            return Err(AppError::ConfigError(format!(
                "unsupported database url scheme '{}'",
                scheme
            )));
        }

        Ok(DatabaseTarget::File(PathBuf::from(url)))
    }
}

/// Database manager with connection pool
#[derive(Clone)]
pub struct DatabaseManager {
    pool: Pool<SqliteConnectionManager>,
    target: DatabaseTarget,
}

impl DatabaseManager {
    /// Open a read-only pool against the store named by the configuration
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let target = DatabaseTarget::parse(&config.url)?;
        let busy_timeout = Duration::from_millis(config.busy_timeout);

        let read_only = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let (manager, pool_size) = match &target {
            // A fresh in-memory database has none of the reference tables.
            DatabaseTarget::Memory => {
                return Err(AppError::ConfigError(
                    "database url must point at an existing database, not an in-memory one"
                        .to_string(),
                ))
            }
            DatabaseTarget::File(path) => {
                if !path.exists() {
                    return Err(AppError::InitializationError(format!(
                        "database file {:?} does not exist",
                        path
                    )));
                }
                (
                    SqliteConnectionManager::file(path).with_flags(read_only),
                    config.connection_pool_size,
                )
            }
            DatabaseTarget::Uri(uri) => (
                SqliteConnectionManager::file(uri).with_flags(read_only),
                config.connection_pool_size,
            ),
        };

        let manager = manager.with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            register_functions(conn)
        });

        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .test_on_check_out(true)
            .build(manager)?;

        Ok(Self { pool, target })
    }

    /// Create a writable in-memory database with the schema in place, for tests
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory().with_init(|conn| {
            register_functions(conn)?;
            crate::db::fixtures::create_schema(conn)
        });

        let pool = Pool::builder()
            .max_size(1) // In-memory databases should use a single connection
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;

        Ok(Self {
            pool,
            target: DatabaseTarget::Memory,
        })
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Execute a database operation asynchronously
    ///
    /// The closure runs on `spawn_blocking` with a pooled connection that is
    /// returned to the pool when the closure finishes, whatever its outcome.
    pub async fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&conn)
        })
        .await
        .map_err(|e| AppError::TaskError(format!("Database task panicked: {}", e)))?
    }

    /// Where this pool points
    pub fn target(&self) -> &DatabaseTarget {
        &self.target
    }

    /// Get the current pool size
    pub fn pool_size(&self) -> u32 {
        self.pool.max_size()
    }

    /// Get the number of idle connections in the pool
    pub fn idle_connections(&self) -> u32 {
        self.pool.state().idle_connections
    }
}

/// Per-character lowercase used on both sides of the search predicate
///
/// `str::to_lowercase` picks the final-sigma form by position, so a query
/// ending in `Σ` would not match the same letter mid-word. Both sigma forms
/// fold to `σ` here.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|ch| if ch == 'ς' { 'σ' } else { ch })
        .collect()
}

/// Register `casefold(text)`, the SQL face of [`fold_case`]
pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let folded = match ctx.get_raw(0) {
                ValueRef::Text(text) => Some(fold_case(&String::from_utf8_lossy(text))),
                ValueRef::Integer(value) => Some(value.to_string()),
                ValueRef::Real(value) => Some(value.to_string()),
                ValueRef::Null | ValueRef::Blob(_) => None,
            };
            Ok(folded)
        },
    )
}
