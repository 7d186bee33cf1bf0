//! Rounding conventions for statline conversion.
//!
//! The published statlines were produced with a handful of slightly
//! unusual rounding helpers. They absorb floating-point representation
//! error (`0.1 * 3 != 0.3`) while still rounding in the direction the
//! rules require, so the constants below (0.4, 0.3) are part of the rules
//! and must be reproduced bit-for-bit.

/// Offset that turns half-up rounding into aggressive upward rounding.
const ROUND_UP_OFFSET: f64 = 0.4;

/// Offset used when rounding up to the nearest half.
const ROUND_UP_TO_HALF_OFFSET: f64 = 0.3;

/// Round half up (`2.5 -> 3`, `2.49 -> 2`).
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round up to the next tenth.
///
/// The value is scaled to an integer number of hundredths first, so
/// representation noise like `0.30000000000000004` stays at `0.3` while
/// `0.31` becomes `0.4`.
#[must_use]
pub fn round_up_to_tenth(value: f64) -> f64 {
    let mut hundredths = round_half_up(value * 100.0) as i64;
    let remainder = hundredths.rem_euclid(10);
    if remainder != 0 {
        hundredths += 10 - remainder;
    }
    hundredths as f64 / 100.0
}

/// Round up aggressively: anything more than ~0.1 above an integer goes up.
#[must_use]
pub fn round_up(value: f64) -> f64 {
    round_half_up(value + ROUND_UP_OFFSET)
}

/// Round up to the nearest half (`1.2 -> 1.5`, `1.05 -> 1.0`).
#[must_use]
pub fn round_up_to_half(value: f64) -> f64 {
    0.5 * round_half_up(value * 2.0 + ROUND_UP_TO_HALF_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(0.0), 0.0);
    }

    #[test]
    fn test_round_up_to_tenth_absorbs_noise() {
        // 0.1 * 3 is 0.30000000000000004 in binary floating point
        assert_eq!(round_up_to_tenth(0.1 * 3.0), 0.3);
        assert_eq!(round_up_to_tenth(0.31), 0.4);
        assert_eq!(round_up_to_tenth(2.5), 2.5);
        assert_eq!(round_up_to_tenth(1.01), 1.1);
    }

    #[test]
    fn test_round_up_to_tenth_is_idempotent() {
        for hundredths in 0..1000 {
            let value = f64::from(hundredths) / 100.0;
            let once = round_up_to_tenth(value);
            assert_eq!(round_up_to_tenth(once), once, "value {value}");
        }
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(2.5), 3.0);
        assert_eq!(round_up(1.1), 2.0);
        // Within ~0.1 of the integer below rounds down to it
        assert_eq!(round_up(1.05), 1.0);
        assert_eq!(round_up(4.0), 4.0);
    }

    #[test]
    fn test_round_up_to_half() {
        assert_eq!(round_up_to_half(1.2), 1.5);
        assert_eq!(round_up_to_half(1.05), 1.0);
        assert_eq!(round_up_to_half(1.5), 1.5);
        assert_eq!(round_up_to_half(1.7), 2.0);
    }
}
