// src/domain/vin/invariants.rs
//
// Structural VIN invariants, checked before construction

use crate::domain::vin::check_digit::{is_vin_character, VIN_LENGTH};
use crate::domain::vin::model_year::is_year_character;
use crate::domain::{DomainError, DomainResult};

/// 0-indexed position of the model-year character.
pub const YEAR_CHARACTER_POSITION: usize = 9;

/// Validates the raw string form of a VIN: length, alphabet, and model-year
/// character. Check-digit verification happens during construction because
/// it may be repaired instead of rejected.
pub fn validate_vin_string(raw: &str) -> DomainResult<()> {
    validate_length(raw)?;
    validate_alphabet(raw)?;
    validate_year_character(raw)?;
    Ok(())
}

/// Exactly 17 characters
fn validate_length(raw: &str) -> DomainResult<()> {
    if raw.chars().count() != VIN_LENGTH {
        return Err(DomainError::InvalidLength(raw.chars().count()));
    }
    Ok(())
}

/// Digits and uppercase letters excluding I, O, Q
fn validate_alphabet(raw: &str) -> DomainResult<()> {
    for (position, character) in raw.chars().enumerate() {
        if !is_vin_character(character) {
            return Err(DomainError::InvalidCharacter {
                character,
                position,
            });
        }
    }
    Ok(())
}

/// Position 10 must be one of the defined year codes
fn validate_year_character(raw: &str) -> DomainResult<()> {
    let year_char = raw
        .chars()
        .nth(YEAR_CHARACTER_POSITION)
        .ok_or(DomainError::InvalidLength(raw.chars().count()))?;
    if !is_year_character(year_char) {
        return Err(DomainError::InvalidYearCharacter(year_char));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_vin_string() {
        assert!(validate_vin_string("5FNYF5H59HB011946").is_ok());
        assert!(validate_vin_string("YT9NN1U14KA007175").is_ok());
    }

    #[test]
    fn test_wrong_length_fails() {
        for raw in ["", "4T1B", "JM3KE4BY6G06", "5FNYF5H59HB0119465"] {
            assert_eq!(
                validate_vin_string(raw),
                Err(DomainError::InvalidLength(raw.len())),
                "length of {raw:?}"
            );
        }
    }

    #[test]
    fn test_non_vin_characters_fail() {
        // 'Q', 'O', and 'I' look like digits and are excluded from the
        // alphabet; the first offender is reported
        let result = validate_vin_string("5FQYF5H59HBO1I946");
        assert_eq!(
            result,
            Err(DomainError::InvalidCharacter {
                character: 'Q',
                position: 2,
            })
        );
        assert!(matches!(
            validate_vin_string("5fnyf5h59hb011946"),
            Err(DomainError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_invalid_year_character_fails() {
        // Position 10 is 'U', which is never used as a year code
        assert_eq!(
            validate_vin_string("5FNYF5H59UB011946"),
            Err(DomainError::InvalidYearCharacter('U')),
        );
    }

    #[test]
    fn test_length_checked_before_alphabet() {
        assert_eq!(
            validate_vin_string("ab!"),
            Err(DomainError::InvalidLength(3)),
        );
    }
}
