// src/domain/vin/check_digit.rs
//
// VIN transliteration table and check-digit arithmetic (49 CFR 565.15)

/// A VIN is always exactly 17 characters.
pub const VIN_LENGTH: usize = 17;

/// 0-indexed position of the check digit within the VIN.
pub const CHECK_DIGIT_POSITION: usize = 8;

/// The 33 characters permitted in a VIN. I, O, and Q are excluded because
/// they read like 1 and 0.
pub const VIN_ALPHABET: &str = "0123456789ABCDEFGHJKLMNPRSTUVWXYZ";

/// Check-digit characters, indexed by the weighted sum mod 11.
const CHECK_DIGIT_CHARACTERS: &str = "0123456789X";

/// Weight of each VIN position in the checksum. The check-digit position
/// itself carries weight 0.
const POSITION_WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Returns true if the character is in the VIN alphabet.
pub fn is_vin_character(c: char) -> bool {
    c.is_ascii_digit() || (c.is_ascii_uppercase() && !matches!(c, 'I' | 'O' | 'Q'))
}

/// Numeric transliteration value of a VIN character.
///
/// Returns `None` for characters outside the VIN alphabet.
pub fn character_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='H' => Some(c as u32 - 'A' as u32 + 1), // A=1 .. H=8
        'J'..='N' => Some(c as u32 - 'J' as u32 + 1), // J=1 .. N=5
        'P' => Some(7),
        'R' => Some(9),
        'S'..='Z' => Some(c as u32 - 'S' as u32 + 2), // S=2 .. Z=9
        _ => None,
    }
}

/// Compute the expected check digit for a 17-character candidate.
///
/// Weighted sum of the transliterated characters (skipping the check-digit
/// position), mod 11, indexed into `0123456789X`. Callers must validate the
/// length and alphabet first; characters outside the alphabet count as 0
/// here rather than panicking.
pub fn compute_check_digit(candidate: &str) -> char {
    let total: u32 = candidate
        .chars()
        .enumerate()
        .filter(|(position, _)| *position != CHECK_DIGIT_POSITION)
        .map(|(position, c)| character_value(c).unwrap_or(0) * POSITION_WEIGHTS[position])
        .sum();

    CHECK_DIGIT_CHARACTERS
        .chars()
        .nth((total % 11) as usize)
        .unwrap_or('0')
}
