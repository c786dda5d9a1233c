// src/repositories/mod.rs
//
// Repositories Module - read-only access to the reference dataset

pub mod pattern_repository;
pub mod sqlite_pattern_repository;

pub use pattern_repository::PatternRepository;
pub use sqlite_pattern_repository::SqlitePatternRepository;

#[cfg(test)]
pub use pattern_repository::MockPatternRepository;
