//! Decimal digit to segment bitmask encoding.
//!
//! The table follows the Adafruit LED-backpack glyph set bit-for-bit so
//! existing backpacks light the expected segments.

use crate::error::EncodingError;
use crate::registers::DIGIT_COUNT;

/// 16-bit segment bitmask for a single digit position. Each set bit lights
/// one LED segment.
pub type SegmentCode = u16;

/// Largest count that fits on the display.
pub const MAX_DISPLAY_VALUE: i32 = 9999;

/// Segment codes for `'0'..='9'`, indexed by digit value.
const DIGIT_SEGMENTS: [SegmentCode; 10] = [
    0b00001100_00111111, // 0
    0b00000000_00000110, // 1
    0b00000000_11011011, // 2
    0b00000000_10001111, // 3
    0b00000000_11100110, // 4
    0b00100000_01101001, // 5
    0b00000000_11111101, // 6
    0b00000000_00000111, // 7
    0b00000000_11111111, // 8
    0b00000000_11101111, // 9
];

/// Look up the segment code for a decimal digit character.
///
/// # Errors
/// [`EncodingError::InvalidDigit`] for anything outside `'0'..='9'`.
pub fn encode(digit: char) -> Result<SegmentCode, EncodingError> {
    digit
        .to_digit(10)
        .map(|d| DIGIT_SEGMENTS[d as usize])
        .ok_or(EncodingError::InvalidDigit(digit))
}

/// Render `count` as four zero-padded decimal characters.
///
/// ```
/// use ht16k33_countdown::encoding::format_count;
///
/// assert_eq!(format_count(42), Ok(['0', '0', '4', '2']));
/// ```
///
/// # Errors
/// [`EncodingError::ValueOutOfRange`] if `count` is negative or above
/// [`MAX_DISPLAY_VALUE`].
pub fn format_count(count: i32) -> Result<[char; DIGIT_COUNT], EncodingError> {
    if !(0..=MAX_DISPLAY_VALUE).contains(&count) {
        return Err(EncodingError::ValueOutOfRange(count));
    }

    let mut digits = ['0'; DIGIT_COUNT];
    let mut rest = count as u32;
    for slot in digits.iter_mut().rev() {
        *slot = (b'0' + (rest % 10) as u8) as char;
        rest /= 10;
    }

    Ok(digits)
}

/// Format and encode `count` in one step, most significant digit first.
pub fn encode_count(count: i32) -> Result<[SegmentCode; DIGIT_COUNT], EncodingError> {
    let digits = format_count(count)?;

    let mut codes = [0; DIGIT_COUNT];
    for (code, &digit) in codes.iter_mut().zip(digits.iter()) {
        *code = encode(digit)?;
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_published_table() {
        let expected: [(char, u16); 10] = [
            ('0', 0x0C3F),
            ('1', 0x0006),
            ('2', 0x00DB),
            ('3', 0x008F),
            ('4', 0x00E6),
            ('5', 0x2069),
            ('6', 0x00FD),
            ('7', 0x0007),
            ('8', 0x00FF),
            ('9', 0x00EF),
        ];
        for (digit, code) in expected {
            assert_eq!(encode(digit), Ok(code), "digit {}", digit);
        }
    }

    #[test]
    fn encode_is_repeatable() {
        for digit in '0'..='9' {
            assert_eq!(encode(digit), encode(digit));
        }
    }

    #[test]
    fn encode_rejects_non_digits() {
        assert_eq!(encode('a'), Err(EncodingError::InvalidDigit('a')));
        assert_eq!(encode(' '), Err(EncodingError::InvalidDigit(' ')));
        assert_eq!(encode('-'), Err(EncodingError::InvalidDigit('-')));
        // Non-ASCII decimal digits are not part of the glyph set.
        assert_eq!(encode('٣'), Err(EncodingError::InvalidDigit('٣')));
    }

    #[test]
    fn format_count_pads_with_zeros() {
        assert_eq!(format_count(0), Ok(['0', '0', '0', '0']));
        assert_eq!(format_count(7), Ok(['0', '0', '0', '7']));
        assert_eq!(format_count(42), Ok(['0', '0', '4', '2']));
        assert_eq!(format_count(999), Ok(['0', '9', '9', '9']));
        assert_eq!(format_count(1000), Ok(['1', '0', '0', '0']));
        assert_eq!(format_count(9999), Ok(['9', '9', '9', '9']));
    }

    #[test]
    fn format_count_out_of_range() {
        assert_eq!(format_count(10000), Err(EncodingError::ValueOutOfRange(10000)));
        assert_eq!(format_count(-1), Err(EncodingError::ValueOutOfRange(-1)));
        assert_eq!(format_count(i32::MIN), Err(EncodingError::ValueOutOfRange(i32::MIN)));
    }

    #[test]
    fn encode_count_orders_most_significant_first() {
        assert_eq!(encode_count(42), Ok([0x0C3F, 0x0C3F, 0x00E6, 0x00DB]));
        assert_eq!(encode_count(1000), Ok([0x0006, 0x0C3F, 0x0C3F, 0x0C3F]));
    }

    #[test]
    fn encode_count_propagates_range_error() {
        assert_eq!(encode_count(12345), Err(EncodingError::ValueOutOfRange(12345)));
    }
}
