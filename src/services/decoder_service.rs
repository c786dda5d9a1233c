// src/services/decoder_service.rs
//
// Decoder Service - the attribute-resolution engine.
//
// Turns a raw VIN string into a fully decoded Vin by combining the
// structural parse, model-year disambiguation against the dataset's
// cars-and-light-trucks WMI set, and the pattern query/merge loop.
//
// RULES:
// - Deterministic: same input + same dataset snapshot → same output
// - Stateless: the service holds only the repository handle; nothing here
//   mutates shared state, so decodes may run concurrently
// - No retries, timers, or cancellation: a dataset query either returns
//   rows or it does not; transient-failure handling belongs to the caller
//   at the connection boundary

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use log::debug;

use crate::domain::{resolve_model_year, DecodedVehicle, Vin};
use crate::error::{DecodeError, DecodeResult};
use crate::repositories::PatternRepository;

// ============================================================================
// DECODE OPTIONS
// ============================================================================

/// Construction-time flags for `DecoderService::decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Rewrite an incorrect check digit instead of rejecting the VIN
    pub repair_check_digit: bool,

    /// Resolve vehicle attributes against the dataset at construction.
    /// When false, only structural parsing and year disambiguation run and
    /// attribute accessors report `DecodingRequired`.
    pub resolve: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            repair_check_digit: false,
            resolve: true,
        }
    }
}

// ============================================================================
// DECODER SERVICE
// ============================================================================

pub struct DecoderService {
    patterns: Arc<dyn PatternRepository>,
}

impl DecoderService {
    pub fn new(patterns: Arc<dyn PatternRepository>) -> Self {
        Self { patterns }
    }

    /// Validate and decode a raw VIN string.
    pub fn decode(&self, raw: &str, options: &DecodeOptions) -> DecodeResult<Vin> {
        self.decode_as_of(raw, options, Utc::now().date_naive())
    }

    /// `decode` with an explicit "today" for the model-year plausibility
    /// bound, so results are reproducible at a fixed date.
    pub fn decode_as_of(
        &self,
        raw: &str,
        options: &DecodeOptions,
        today: NaiveDate,
    ) -> DecodeResult<Vin> {
        let mut vin = Vin::parse_with_options(raw, options.repair_check_digit)?;
        let wmi = vin.wmi();

        // Re-resolve the year now that WMI membership is known
        let cars_and_light_trucks = self.patterns.cars_and_light_trucks_wmis()?;
        let vds_char7 = vin.as_str().as_bytes()[6] as char;
        let year = resolve_model_year(
            vin.year_char(),
            vds_char7,
            cars_and_light_trucks.contains(&wmi),
            today,
        )?;
        debug!(
            "decode {raw}: wmi={wmi} candidates={:?} conclusive={}",
            year.candidates(),
            year.is_conclusive()
        );
        vin.set_resolved_year(year.clone());

        if options.resolve {
            let vehicle = self.resolve_attributes(&wmi, vin.vds(), year.candidates())?;
            vin.set_decoded(vehicle);
        }

        Ok(vin)
    }

    /// Resolve vehicle attributes for a WMI + VDS against the dataset.
    ///
    /// Year candidates are tried in order; the first candidate with any
    /// matching pattern rows wins. An empty candidate slice runs the
    /// year-unconstrained query variant. When no candidate matches at all,
    /// a WMI that maps to exactly one make still yields that make; only an
    /// empty or ambiguous fallback fails with `DecodingFailed`.
    pub fn resolve_attributes(
        &self,
        wmi: &str,
        vds: &str,
        year_candidates: &[i32],
    ) -> DecodeResult<DecodedVehicle> {
        if year_candidates.is_empty() {
            if let Some(vehicle) = self.resolve_for_year(wmi, vds, None)? {
                return Ok(vehicle);
            }
        }
        for &year in year_candidates {
            if let Some(vehicle) = self.resolve_for_year(wmi, vds, Some(year))? {
                return Ok(vehicle);
            }
        }

        if let Some(make) = self.patterns.find_make_for_wmi(wmi)? {
            debug!("no pattern for wmi={wmi} vds={vds}, fell back to make {make}");
            let mut vehicle = DecodedVehicle::empty(year_candidates.first().copied());
            vehicle.make = Some(make);
            return Ok(vehicle);
        }

        Err(DecodeError::DecodingFailed)
    }

    /// One year-constrained query + merge pass.
    ///
    /// Matched rows carry data at different granularities and are merged,
    /// not chosen exclusively: iterating them in dataset order, each
    /// attribute keeps the first non-empty value it sees.
    fn resolve_for_year(
        &self,
        wmi: &str,
        vds: &str,
        year: Option<i32>,
    ) -> DecodeResult<Option<DecodedVehicle>> {
        let rows = self.patterns.find_patterns(wmi, year, vds)?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut vehicle = DecodedVehicle::empty(year);
        for row in &rows {
            vehicle.fill_missing_from(row);
        }

        // Rows matched but none carried a make: the WMI itself may still
        // determine it
        if vehicle.make.is_none() {
            vehicle.make = self.patterns.find_make_for_wmi(wmi)?;
        }

        Ok(Some(vehicle))
    }
}
