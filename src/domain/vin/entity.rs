// src/domain/vin/entity.rs
//
// The VIN value object.
//
// A Vin is an immutable, validated 17-character Vehicle Identification
// Number. Construction enforces every structural invariant; the segment
// accessors can therefore never fail. Attribute accessors (make, model, ...)
// are only available once a DecoderService has resolved the VIN against the
// reference dataset.
//
//                                     model year
//                                         |
//                WMI          check digit | plant
//              |-----|                 |  |  |  |--- serial ----|
//   Position   1  2  3  4  5  6  7  8  9  10 11 12 13 14 15 16 17
//                       |-----------|     |---------------------|
//                            VDS                    VIS

use std::fmt;

use chrono::Utc;

use crate::domain::vehicle::DecodedVehicle;
use crate::domain::vin::check_digit::{compute_check_digit, CHECK_DIGIT_POSITION};
use crate::domain::vin::invariants::{validate_vin_string, YEAR_CHARACTER_POSITION};
use crate::domain::vin::model_year::{resolve_model_year, ResolvedYear};
use crate::domain::{DomainError, DomainResult};

/// Character at position 3 marking a specialized (low-volume) manufacturer,
/// whose WMI extends into positions 12-14.
const SPECIALIZED_MANUFACTURER_MARKER: char = '9';

/// A validated 17-character Vehicle Identification Number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vin {
    raw: String,
    year: ResolvedYear,
    decoded: Option<DecodedVehicle>,
}

impl Vin {
    /// Parse and validate a VIN, rejecting an incorrect check digit.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        Self::parse_with_options(raw, false)
    }

    /// Parse and validate a VIN.
    ///
    /// With `repair_check_digit`, an incorrect check digit is rewritten to
    /// the computed value instead of failing with `CheckDigitMismatch`.
    pub fn parse_with_options(raw: &str, repair_check_digit: bool) -> DomainResult<Self> {
        validate_vin_string(raw)?;

        let expected = compute_check_digit(raw);
        let actual = raw.as_bytes()[CHECK_DIGIT_POSITION] as char;

        let raw = if actual == expected {
            raw.to_string()
        } else if repair_check_digit {
            let mut repaired = raw.to_string();
            repaired.replace_range(CHECK_DIGIT_POSITION..CHECK_DIGIT_POSITION + 1, &expected.to_string());
            repaired
        } else {
            return Err(DomainError::CheckDigitMismatch { expected, actual });
        };

        // Year candidates from the plausibility rule alone; the decoder
        // service refines this once it knows whether the WMI makes cars or
        // light trucks
        let year_char = raw.as_bytes()[YEAR_CHARACTER_POSITION] as char;
        let vds_char7 = raw.as_bytes()[6] as char;
        let year = resolve_model_year(year_char, vds_char7, false, Utc::now().date_naive())?;

        Ok(Self {
            raw,
            year,
            decoded: None,
        })
    }

    // ------------------------------------------------------------------
    // Structural accessors (never fail)
    // ------------------------------------------------------------------

    /// The 17-character VIN string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The World Manufacturer Identifier.
    ///
    /// Mass-market manufacturers are assigned a three-character WMI
    /// (positions 1-3). Specialized manufacturers, marked by a '9' at
    /// position 3, are assigned six characters (positions 1-3 and 12-14):
    ///
    /// `5FNYF5H59HB011946` → `5FN` (Honda)
    /// `YT9NN1U14KA007175` → `YT9007` (Koenigsegg)
    pub fn wmi(&self) -> String {
        if self.is_specialized_manufacturer() {
            format!("{}{}", &self.raw[..3], &self.raw[11..14])
        } else {
            self.raw[..3].to_string()
        }
    }

    /// The Vehicle Description Section, positions 4-8.
    pub fn vds(&self) -> &str {
        &self.raw[3..8]
    }

    /// The Vehicle Identification Section, positions 10-17.
    pub fn vis(&self) -> &str {
        &self.raw[9..]
    }

    /// The model-year character, position 10.
    pub fn year_char(&self) -> char {
        self.raw.as_bytes()[YEAR_CHARACTER_POSITION] as char
    }

    /// True when position 3 carries the specialized-manufacturer marker.
    pub fn is_specialized_manufacturer(&self) -> bool {
        self.raw.as_bytes()[2] as char == SPECIALIZED_MANUFACTURER_MARKER
    }

    /// The normalized pattern-lookup key: the VIN with the check digit
    /// replaced by `*`, truncated after the plant character (position 11,
    /// or 14 for specialized manufacturers).
    pub fn descriptor(&self) -> String {
        let mut descriptor = self.raw.clone();
        descriptor.replace_range(CHECK_DIGIT_POSITION..CHECK_DIGIT_POSITION + 1, "*");
        if self.is_specialized_manufacturer() {
            descriptor.truncate(14);
        } else {
            descriptor.truncate(11);
        }
        descriptor
    }

    /// The model year: the year the dataset confirmed when the VIN has been
    /// decoded, otherwise the preferred candidate.
    pub fn model_year(&self) -> i32 {
        self.decoded
            .as_ref()
            .and_then(|decoded| decoded.model_year)
            .unwrap_or_else(|| self.year.year())
    }

    /// The model-year candidates, in resolution order.
    pub fn resolved_year(&self) -> &ResolvedYear {
        &self.year
    }

    // ------------------------------------------------------------------
    // Attribute accessors (require resolution)
    // ------------------------------------------------------------------

    /// The full resolved attribute set, or `DecodingRequired` if this VIN
    /// was constructed without resolution.
    pub fn decoded(&self) -> DomainResult<&DecodedVehicle> {
        self.decoded.as_ref().ok_or(DomainError::DecodingRequired)
    }

    pub fn manufacturer(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.manufacturer.as_deref())
    }

    pub fn make(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.make.as_deref())
    }

    pub fn model(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.model.as_deref())
    }

    pub fn series(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.series.as_deref())
    }

    pub fn trim(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.trim.as_deref())
    }

    pub fn body_class(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.body_class.as_deref())
    }

    pub fn electrification_level(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.electrification_level.as_deref())
    }

    pub fn vehicle_type(&self) -> DomainResult<Option<&str>> {
        Ok(self.decoded()?.vehicle_type.as_deref())
    }

    // ------------------------------------------------------------------
    // Crate-internal mutation, used exclusively by DecoderService
    // ------------------------------------------------------------------

    pub(crate) fn set_resolved_year(&mut self, year: ResolvedYear) {
        self.year = year;
    }

    pub(crate) fn set_decoded(&mut self, decoded: DecodedVehicle) {
        self.decoded = Some(decoded);
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
