// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod decoder_service;

#[cfg(test)]
mod decoder_service_tests;

pub use decoder_service::{DecodeOptions, DecoderService};
