// src/db/connection.rs
//
// Dataset connection management
//
// PRINCIPLES:
// - Explicit connection pooling, no singleton dataset handle
// - The engine never writes: connections are opened read-only
// - Clear error propagation
// - Thread-safe access (one pooled connection per concurrent resolution)

use log::debug;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

use crate::error::{DecodeError, DecodeResult};

/// Type alias for the dataset connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled dataset connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// The default reference-dataset location:
/// `{APP_DATA}/vin-decoder/vehicles.db`
///
/// The dataset is produced and refreshed by external tooling; this crate
/// only ever reads it.
pub fn default_dataset_path() -> DecodeResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| DecodeError::Other("Could not determine app data directory".to_string()))?;

    Ok(data_dir.join("vin-decoder").join("vehicles.db"))
}

/// Create a read-only connection pool over the dataset file
///
/// Pool configuration:
/// - Max 15 connections (one per concurrent resolution is plenty)
/// - Read-only open flags: the engine must never mutate the dataset
/// - Busy timeout set to avoid immediate errors while the dataset is
///   being replaced by the update tooling
pub fn create_connection_pool(dataset_path: &Path) -> DecodeResult<ConnectionPool> {
    if !dataset_path.exists() {
        return Err(DecodeError::Other(format!(
            "Reference dataset not found at {}",
            dataset_path.display()
        )));
    }

    debug!("Opening dataset {}", dataset_path.display());

    let manager = SqliteConnectionManager::file(dataset_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX)
        .with_init(|conn| {
            conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
            Ok(())
        });

    let pool = Pool::builder()
        .max_size(15)
        .build(manager)
        .map_err(|e| DecodeError::Pool(format!("Failed to create dataset pool: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> DecodeResult<PooledConn> {
    pool.get()
        .map_err(|e| DecodeError::Pool(format!("Failed to get dataset connection: {}", e)))
}

/// Create a standalone writable connection (for dataset builds and tests)
///
/// This creates an in-memory database, useful for unit tests.
pub fn create_test_connection() -> DecodeResult<Connection> {
    let conn = Connection::open_in_memory().map_err(DecodeError::Dataset)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(DecodeError::Dataset)?;

    Ok(conn)
}
