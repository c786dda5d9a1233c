// src/lib.rs
// vin-decoder - VIN validation and reference-dataset decoding
//
// Architecture:
// - Domain-centric: VIN structure, check-digit math, and model-year rules
//   live in value objects with invariants enforced at construction
// - Explicit collaborators: the reference dataset is reached only through
//   the PatternRepository trait; no global dataset handle
// - Stateless engine: every resolution is a pure function of its inputs
//   and the dataset snapshot, safe to run concurrently
//
// Typical use:
//
//   let pool = db::create_connection_pool(&dataset_path)?;
//   let repo = Arc::new(SqlitePatternRepository::new(Arc::new(pool)));
//   let service = DecoderService::new(repo);
//   let vin = service.decode("5FNYF5H59HB011946", &DecodeOptions::default())?;
//   assert_eq!(vin.make()?, Some("Honda"));

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use domain::{
    compute_check_digit,
    is_vin_character,
    resolve_model_year,
    validate_vin_string,
    DecodedVehicle,
    DomainError,
    DomainResult,
    Pattern,
    ResolvedYear,
    Vin,
    VIN_ALPHABET,
    VIN_LENGTH,
};

pub use error::{DecodeError, DecodeResult};

pub use repositories::{PatternRepository, SqlitePatternRepository};

pub use services::{DecodeOptions, DecoderService};
