// src/domain/vehicle/mod.rs
//
// Vehicle Domain - dataset pattern rows and resolved vehicle attributes

pub mod entity;

pub use entity::{DecodedVehicle, Pattern};
