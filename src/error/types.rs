// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

/// Crate-level errors.
///
/// Structural VIN violations arrive wrapped as `Domain`; everything else is
/// a dataset or resolution condition. Dataset failures are never retried or
/// swallowed here - callers wanting timeouts or retries own that at the
/// connection boundary.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The reference dataset could not be queried
    #[error("dataset error: {0}")]
    Dataset(#[from] rusqlite::Error),

    /// No dataset connection could be acquired from the pool
    #[error("dataset pool error: {0}")]
    Pool(String),

    /// Structural VIN validation or value-object usage error
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Resolution ran, but no pattern matched and no unambiguous make could
    /// be derived from the WMI. Distinct from the structural errors so
    /// callers can tell "bad VIN" from "valid VIN, unknown vehicle".
    #[error("no pattern in the dataset matches this VIN")]
    DecodingFailed,

    #[error("{0}")]
    Other(String),
}

impl From<r2d2::Error> for DecodeError {
    fn from(err: r2d2::Error) -> Self {
        DecodeError::Pool(err.to_string())
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
