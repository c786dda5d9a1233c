// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod vehicle;
pub mod vin;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// VIN Domain
pub use vin::check_digit::{compute_check_digit, is_vin_character, VIN_ALPHABET, VIN_LENGTH};
pub use vin::model_year::{resolve_model_year, ResolvedYear};
pub use vin::{validate_vin_string, Vin};

// Vehicle Domain (dataset rows + resolved attributes)
pub use vehicle::{DecodedVehicle, Pattern};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of the VIN structural invariants and misuse
/// of the value-object API. Dataset and resolution failures live in
/// `crate::error::DecodeError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("VIN must be exactly 17 characters long, got {0}")]
    InvalidLength(usize),

    #[error("VIN contains non-VIN character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("VIN model-year character {0:?} is not a valid year code")]
    InvalidYearCharacter(char),

    #[error("VIN check digit is incorrect: expected {expected:?}, found {actual:?}")]
    CheckDigitMismatch { expected: char, actual: char },

    #[error("vehicle attributes were not resolved for this VIN; decode it first")]
    DecodingRequired,
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
