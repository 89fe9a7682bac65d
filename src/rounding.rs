//! Rounding helpers
//!
//! Indication figures are rounded at fixed points in the calculation and the
//! rounded value feeds later steps, so the rounding rule itself matters.

/// Round `value` to `decimals` places.
///
/// For `decimals >= 0` the result is the exact binary value correctly rounded
/// to that many decimal digits (ties to even). `0.9785` is stored slightly
/// above the tie and therefore rounds to `0.979`.
///
/// For `decimals < 0` the value is scaled down by `10^-decimals`, rounded half
/// to even, and scaled back up: `round_to(1234.0, -1) == 1230.0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    if decimals >= 0 {
        // Formatting with a precision rounds from the exact decimal expansion
        format!("{:.*}", decimals as usize, value)
            .parse()
            .unwrap_or(value)
    } else {
        let factor = 10f64.powi(-decimals);
        (value / factor).round_ties_even() * factor
    }
}

/// Shorthand for the three-decimal rounding used for factors and ratios
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

/// Round to the nearest multiple of ten
pub fn round_to_tens(value: f64) -> f64 {
    round_to(value, -1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3_basic() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(0.77842), 0.778);
        assert_eq!(round3(2.0), 2.0);
    }

    #[test]
    fn test_round3_uses_exact_binary_value() {
        // 950 * 1.03 / 1000 is stored just above 0.9785
        assert_eq!(round3(950.0 * 1.03 / 1000.0), 0.979);
        // 2.675 is stored just below the tie
        assert_eq!(round_to(2.675, 2), 2.67);
    }

    #[test]
    fn test_round_to_tens() {
        assert_eq!(round_to_tens(1234.0), 1230.0);
        assert_eq!(round_to_tens(1236.0), 1240.0);
        assert_eq!(round_to_tens(1000.0), 1000.0);
        // Exact ties go to the even multiple
        assert_eq!(round_to_tens(1225.0), 1220.0);
        assert_eq!(round_to_tens(1235.0), 1240.0);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round3(f64::NAN).is_nan());
        assert_eq!(round_to_tens(f64::INFINITY), f64::INFINITY);
    }
}
