// src/domain/vin/model_year.rs
//
// Model-year resolution.
//
// Position 10 of a VIN encodes the model year with a single character, and
// the code cycle repeats every 30 years ('S' is both 1995 and 2025). Two
// rules disambiguate:
// - cars and light trucks built on/before April 30 2009 carry a digit at
//   VDS position 7, later ones a letter (49 CFR 565.15(c))
// - a vehicle cannot be model-year dated more than one year into the future
//
// When neither rule applies, both candidate years are returned and callers
// probe the dataset with each in order.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

// ============================================================================
// RESOLVED YEAR (VALUE OBJECT)
// ============================================================================

/// The calendar-year candidates for a VIN's model-year character.
///
/// Holds one candidate when disambiguation was conclusive, otherwise two
/// candidates 30 years apart, later year first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedYear {
    candidates: Vec<i32>,
    conclusive: bool,
}

impl ResolvedYear {
    fn conclusive(year: i32) -> Self {
        Self {
            candidates: vec![year],
            conclusive: true,
        }
    }

    fn ambiguous(later: i32) -> Self {
        Self {
            candidates: vec![later, later - 30],
            conclusive: false,
        }
    }

    /// The preferred candidate (the only one when conclusive, otherwise the
    /// later of the pair).
    pub fn year(&self) -> i32 {
        self.candidates[0]
    }

    /// All candidate years, in the order they should be tried.
    pub fn candidates(&self) -> &[i32] {
        &self.candidates
    }

    /// True when the disambiguation rules fully determined a single year.
    pub fn is_conclusive(&self) -> bool {
        self.conclusive
    }
}

// ============================================================================
// YEAR-CODE TABLE
// ============================================================================

/// Base model year for a year-code character, before any 30-year rollback.
///
/// Returns `None` for characters that are never used as year codes
/// ('0', 'U', 'Z', and anything outside the VIN alphabet).
pub fn base_year(year_char: char) -> Option<i32> {
    match year_char {
        'A'..='H' => Some(2010 + (year_char as i32 - 'A' as i32)),
        'J'..='N' => Some(2018 + (year_char as i32 - 'J' as i32)),
        'P' => Some(2023),
        'R'..='T' => Some(2024 + (year_char as i32 - 'R' as i32)),
        'V'..='Y' => Some(2027 + (year_char as i32 - 'V' as i32)),
        '1'..='9' => Some(2031 + (year_char as i32 - '1' as i32)),
        _ => None,
    }
}

/// Returns true if the character is a valid model-year code.
pub fn is_year_character(c: char) -> bool {
    base_year(c).is_some()
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve the model-year character to calendar-year candidates.
///
/// `vds_char7` is the character at VIN position 7 (0-indexed 6) and
/// `cars_or_light_trucks` whether the WMI belongs to a passenger-car or
/// light-truck manufacturer; together they decide which 30-year cycle
/// applies. `today` bounds the future: no vehicle is dated beyond next
/// year. Deterministic and idempotent for fixed inputs.
pub fn resolve_model_year(
    year_char: char,
    vds_char7: char,
    cars_or_light_trucks: bool,
    today: NaiveDate,
) -> DomainResult<ResolvedYear> {
    let base = base_year(year_char).ok_or(DomainError::InvalidYearCharacter(year_char))?;

    let mut year = base;
    let mut conclusive = false;

    if cars_or_light_trucks {
        // Numeric VDS position 7 means built on/before April 30 2009
        if vds_char7.is_ascii_digit() {
            year -= 30;
        }
        conclusive = true;
    }

    if year > today.year() + 1 {
        year -= 30;
        conclusive = true;
    }

    if conclusive {
        Ok(ResolvedYear::conclusive(year))
    } else {
        Ok(ResolvedYear::ambiguous(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    #[test]
    fn test_year_code_table() {
        let expected = [
            ('A', 2010),
            ('H', 2017),
            ('J', 2018),
            ('N', 2022),
            ('P', 2023),
            ('R', 2024),
            ('S', 2025),
            ('T', 2026),
            ('V', 2027),
            ('W', 2028),
            ('X', 2029),
            ('Y', 2030),
            ('1', 2031),
            ('9', 2039),
        ];
        for (c, year) in expected {
            assert_eq!(base_year(c), Some(year), "base year of {c:?}");
        }
        for c in ['0', 'U', 'Z', 'I', 'O', 'Q', '*'] {
            assert_eq!(base_year(c), None, "{c:?} is not a year code");
        }
    }

    #[test]
    fn test_invalid_year_character_is_rejected() {
        assert_eq!(
            resolve_model_year('U', 'A', false, today()),
            Err(DomainError::InvalidYearCharacter('U')),
        );
    }

    #[test]
    fn test_light_truck_with_numeric_vds7_rolls_back_30_years() {
        // 2GCEC19Z0S1245490: 'S' alone is 2025 or 1995; the Chevrolet WMI
        // is in the cars-and-light-trucks set and VDS position 7 is '9',
        // so 1995 is conclusive
        let resolved = resolve_model_year('S', '9', true, today()).unwrap();
        assert_eq!(resolved.year(), 1995);
        assert!(resolved.is_conclusive());
        assert_eq!(resolved.candidates(), &[1995]);
    }

    #[test]
    fn test_light_truck_with_alphabetic_vds7_keeps_base_year() {
        // 5FNYF5H59HB011946: 'H' with alphabetic VDS position 7 stays 2017
        let resolved = resolve_model_year('H', 'H', true, today()).unwrap();
        assert_eq!(resolved.year(), 2017);
        assert!(resolved.is_conclusive());
    }

    #[test]
    fn test_future_year_rolls_back_even_without_wmi_membership() {
        // '9' is 2039, which is beyond 2027 from today's vantage point
        let resolved = resolve_model_year('9', 'U', false, today()).unwrap();
        assert_eq!(resolved.year(), 2009);
        assert!(resolved.is_conclusive());
    }

    #[test]
    fn test_next_year_is_still_plausible() {
        // 'V' is 2027, exactly today.year + 1: allowed, but ambiguous
        let resolved = resolve_model_year('V', 'A', false, today()).unwrap();
        assert_eq!(resolved.candidates(), &[2027, 1997]);
        assert!(!resolved.is_conclusive());
    }

    #[test]
    fn test_inconclusive_returns_both_candidates_later_first() {
        let resolved = resolve_model_year('K', 'B', false, today()).unwrap();
        assert_eq!(resolved.candidates(), &[2019, 1989]);
        assert_eq!(resolved.year(), 2019);
        assert!(!resolved.is_conclusive());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let a = resolve_model_year('S', '9', true, today()).unwrap();
        let b = resolve_model_year('S', '9', true, today()).unwrap();
        assert_eq!(a, b);
    }
}
