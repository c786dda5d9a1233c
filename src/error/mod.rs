// src/error/mod.rs
//
// Error module

pub mod types;

pub use types::{DecodeError, DecodeResult};
