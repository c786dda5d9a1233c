// src/db/migrations.rs
//
// Dataset schema initialization
//
// The decoding engine treats the dataset as read-only; this module exists
// for the packaging tooling that builds the dataset file and for test
// fixtures. Safe to call multiple times (idempotent).

use rusqlite::Connection;

use crate::error::{DecodeError, DecodeResult};

/// Current dataset schema version
/// Increment this when the schema changes
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the dataset schema
///
/// This function:
/// 1. Checks the current schema version
/// 2. Applies the schema when the database is fresh
/// 3. Refuses to open datasets built against another schema version
pub fn initialize_dataset(conn: &Connection) -> DecodeResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(DecodeError::Other(format!(
            "Dataset schema version {} is outdated. Expected {}. Rebuild the dataset.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(DecodeError::Other(format!(
            "Dataset schema version {} is newer than supported {}. Update the library.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Get current schema version
/// Returns 0 if the schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> DecodeResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(DecodeError::Dataset)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(DecodeError::Dataset)?;

    Ok(version.unwrap_or(0))
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> DecodeResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(DecodeError::Dataset)?;

    Ok(())
}

/// Apply initial schema (version 1)
fn apply_initial_schema(conn: &Connection) -> DecodeResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| DecodeError::Other(format!("Failed to apply dataset schema: {}", e)))?;

    Ok(())
}

// ============================================================================
// DATASET UTILITIES
// ============================================================================

/// Row counts of the reference dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    pub wmis: i64,
    pub patterns: i64,
}

/// Count the WMIs and patterns in the dataset
pub fn dataset_stats(conn: &Connection) -> DecodeResult<DatasetStats> {
    let wmis: i64 = conn
        .query_row("SELECT COUNT(*) FROM wmi", [], |row| row.get(0))
        .map_err(DecodeError::Dataset)?;
    let patterns: i64 = conn
        .query_row("SELECT COUNT(*) FROM pattern", [], |row| row.get(0))
        .map_err(DecodeError::Dataset)?;

    Ok(DatasetStats { wmis, patterns })
}

/// Verify that the dataset file is structurally sound and carries the
/// tables the repository expects
pub fn verify_dataset_integrity(conn: &Connection) -> DecodeResult<()> {
    let integrity: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(DecodeError::Dataset)?;
    if integrity != "ok" {
        return Err(DecodeError::Other(format!(
            "Dataset failed integrity check: {}",
            integrity
        )));
    }

    for table in ["wmi", "pattern"] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .map_err(DecodeError::Dataset)?;
        if !exists {
            return Err(DecodeError::Other(format!(
                "Dataset is missing the {} table",
                table
            )));
        }
    }

    Ok(())
}
