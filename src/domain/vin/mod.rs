// src/domain/vin/mod.rs
//
// VIN Domain - structural parsing, check-digit math, model-year resolution

pub mod check_digit;
pub mod entity;
pub mod invariants;
pub mod model_year;

pub use entity::Vin;
pub use invariants::validate_vin_string;
pub use model_year::{resolve_model_year, ResolvedYear};
