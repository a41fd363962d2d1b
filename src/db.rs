//! Connection pool creation and schema initialization for the application database.

use std::{path::PathBuf, time::Duration};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// A pool of connections to the application database.
///
/// Connections taken from the pool with [Pool::get] go back to the pool when
/// they are dropped.
pub type DbPool = Pool<SqliteConnectionManager>;

/// The maximum number of connections in the pool when not configured otherwise.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// How long to wait for a free connection before giving up.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// How long SQLite waits on a locked database before returning `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the database lives and how many connections to keep open to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `None` for an in-memory database.
    pub path: Option<PathBuf>,
    /// The maximum number of pooled connections.
    ///
    /// Ignored for in-memory databases, see [DbConfig::in_memory].
    pub pool_size: u32,
}

impl DbConfig {
    /// Config for a database stored in the file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Config for an in-memory database.
    ///
    /// Every SQLite connection to `:memory:` opens its own private database, so
    /// the pool for an in-memory database always holds exactly one connection.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            pool_size: 1,
        }
    }

    /// Set the maximum number of pooled connections.
    pub fn pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }
}

/// Create a connection pool for the database described by `config` and make
/// sure the database has the application's tables.
///
/// # Errors
/// Returns a:
/// - [Error::ConnectionPool] if the pool could not open its connections,
/// - or [Error::SqlError] if the tables could not be created.
pub fn create_pool(config: &DbConfig) -> Result<DbPool, Error> {
    let pool = match &config.path {
        Some(path) => {
            let manager = SqliteConnectionManager::file(path).with_init(|connection| {
                connection.busy_timeout(BUSY_TIMEOUT)?;
                connection.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))
            });

            Pool::builder()
                .max_size(config.pool_size)
                .connection_timeout(CONNECTION_TIMEOUT)
                .build(manager)?
        }
        None => {
            if config.pool_size != 1 {
                tracing::warn!(
                    "ignoring pool size {} for in-memory database, using a single connection",
                    config.pool_size
                );
            }

            // The database disappears with its only connection, so never let
            // the pool recycle it.
            Pool::builder()
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connection_timeout(CONNECTION_TIMEOUT)
                .build(SqliteConnectionManager::memory())?
        }
    };

    initialize(&*pool.get()?)?;

    Ok(pool)
}

/// Create the application's tables if they do not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
