// src/domain/vehicle/entity.rs
//
// Vehicle value objects.
//
// Pure, immutable data structures carried between the pattern repository
// and the decoder service:
// - Pattern is one reference-dataset row (a WMI + year range + VDS regex
//   mapped to partial vehicle attributes)
// - DecodedVehicle is the merged attribute bag attached to a decoded Vin
//
// Patterns encode data at different granularities: one row may carry
// make/model, another series/trim for the same vehicles. They are merged
// field by field, never chosen exclusively.

use serde::{Deserialize, Serialize};

// ============================================================================
// PATTERN (DATASET ROW)
// ============================================================================

/// One manufacturer-assigned pattern row from the reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// WMI this pattern applies to (3 or 6 characters)
    pub wmi: String,

    /// Regular expression matched against the VDS, anchored at the start
    pub vds_pattern: String,

    /// Inclusive model-year range
    pub from_year: i32,
    pub to_year: i32,

    /// Linked attributes; any may be absent at this row's granularity
    pub manufacturer: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub series: Option<String>,
    pub trim: Option<String>,
    pub body_class: Option<String>,
    pub electrification_level: Option<String>,
    pub vehicle_type: Option<String>,
    pub truck_type: Option<String>,
    pub country: Option<String>,
}

// ============================================================================
// DECODED VEHICLE (MERGED ATTRIBUTES)
// ============================================================================

/// The vehicle attributes resolved for a VIN.
///
/// Built once per successful resolution by merging matched pattern rows in
/// dataset order, first non-empty value per field. Immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedVehicle {
    /// The model year the dataset match was resolved against; `None` when
    /// the year-unconstrained query variant produced this vehicle
    pub model_year: Option<i32>,

    pub manufacturer: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub series: Option<String>,
    pub trim: Option<String>,
    pub body_class: Option<String>,
    pub electrification_level: Option<String>,
    pub vehicle_type: Option<String>,
    pub truck_type: Option<String>,
    pub country: Option<String>,
}

impl DecodedVehicle {
    /// An attribute bag with every field still unknown.
    pub fn empty(model_year: Option<i32>) -> Self {
        Self {
            model_year,
            manufacturer: None,
            make: None,
            model: None,
            series: None,
            trim: None,
            body_class: None,
            electrification_level: None,
            vehicle_type: None,
            truck_type: None,
            country: None,
        }
    }

    /// Fill every still-empty field from a pattern row.
    ///
    /// Fields are monotonic: once set they never change, so iterating rows
    /// in dataset order gives each field the first non-empty value.
    pub fn fill_missing_from(&mut self, pattern: &Pattern) {
        fill(&mut self.manufacturer, &pattern.manufacturer);
        fill(&mut self.make, &pattern.make);
        fill(&mut self.model, &pattern.model);
        fill(&mut self.series, &pattern.series);
        fill(&mut self.trim, &pattern.trim);
        fill(&mut self.body_class, &pattern.body_class);
        fill(&mut self.electrification_level, &pattern.electrification_level);
        fill(&mut self.vehicle_type, &pattern.vehicle_type);
        fill(&mut self.truck_type, &pattern.truck_type);
        fill(&mut self.country, &pattern.country);
    }

    /// Human-readable vehicle name: model year, make, model, series, trim.
    pub fn name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(year) = self.model_year {
            parts.push(year.to_string());
        }
        for field in [&self.make, &self.model, &self.series, &self.trim] {
            if let Some(value) = field {
                parts.push(value.clone());
            }
        }
        parts.join(" ")
    }
}

/// Copy `source` into `target` if the target is empty and the source is a
/// non-empty string.
fn fill(target: &mut Option<String>, source: &Option<String>) {
    if target.is_none() {
        if let Some(value) = source {
            if !value.is_empty() {
                *target = Some(value.clone());
            }
        }
    }
}
