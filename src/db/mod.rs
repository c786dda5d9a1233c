// src/db/mod.rs
//
// Dataset database module
//
// Provides:
// - Read-only connection pooling over the reference dataset
// - Dataset schema initialization (for packaging tooling and test fixtures)
// - Dataset utilities

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, default_dataset_path, get_connection, ConnectionPool, PooledConn,
};

pub use migrations::{
    dataset_stats, initialize_dataset, verify_dataset_integrity, DatasetStats,
};
