//! Cumulative development factors from selected age-to-age factors

use crate::error::{IndicationError, Result};
use crate::rounding::round3;
use crate::triangle::MeasureType;
use log::debug;
use serde::{Deserialize, Serialize};

/// Where the running product is rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CdfRounding {
    /// Round each partial product to 3 decimals before the next multiplication
    #[default]
    Stepwise,
    /// Carry the exact product, round each reported factor once
    FinalOnly,
}

/// Check a selected factor sequence against a triangle with `periods` origins
///
/// A selection carries one factor per origin period: the `periods - 1`
/// age-to-age transitions followed by the tail factor from the oldest age to
/// ultimate.
pub fn validate_selection(measure: &MeasureType, selected: &[f64], periods: usize) -> Result<()> {
    if selected.len() != periods {
        return Err(IndicationError::SelectionLength {
            measure: measure.clone(),
            periods,
            expected: periods,
            actual: selected.len(),
        });
    }

    if let Some((position, &value)) = selected
        .iter()
        .enumerate()
        .find(|(_, f)| !f.is_finite() || **f <= 0.0)
    {
        return Err(IndicationError::InvalidSelection {
            measure: measure.clone(),
            position,
            value,
        });
    }

    Ok(())
}

/// Reverse cumulative product of selected factors
///
/// `selected` is ordered youngest transition first (the order of
/// `period_windows`). The result is ordered oldest origin period first: the
/// oldest gets the last selected factor, the youngest the product of all.
pub fn calculate_cdfs(selected: &[f64], rounding: CdfRounding) -> Vec<f64> {
    let mut running = 1.0;
    let cdfs: Vec<f64> = selected
        .iter()
        .rev()
        .map(|&factor| match rounding {
            CdfRounding::Stepwise => {
                running = round3(running * factor);
                running
            }
            CdfRounding::FinalOnly => {
                running *= factor;
                round3(running)
            }
        })
        .collect();

    debug!("CDFs ({:?}): {:?}", rounding, cdfs);
    cdfs
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAID_SELECTED: [f64; 10] = [1.830, 1.440, 1.090, 1.020, 1.010, 1.0, 1.010, 1.0, 1.0, 1.0];

    #[test]
    fn test_all_ones() {
        for len in 1..12 {
            for mode in [CdfRounding::Stepwise, CdfRounding::FinalOnly] {
                let cdfs = calculate_cdfs(&vec![1.0; len], mode);
                assert_eq!(cdfs, vec![1.0; len]);
            }
        }
    }

    #[test]
    fn test_stepwise_ordering() {
        let cdfs = calculate_cdfs(&PAID_SELECTED, CdfRounding::Stepwise);
        assert_eq!(cdfs.len(), PAID_SELECTED.len());
        // Oldest origin period gets the last selected factor
        assert_eq!(cdfs[0], 1.0);
        assert_eq!(
            cdfs,
            vec![1.0, 1.0, 1.0, 1.01, 1.01, 1.02, 1.04, 1.134, 1.633, 2.988]
        );
    }

    #[test]
    fn test_final_only_rounding_differs() {
        let cdfs = calculate_cdfs(&PAID_SELECTED, CdfRounding::FinalOnly);
        assert_eq!(cdfs[6], 1.041);
        assert_eq!(cdfs[9], 2.989);
    }

    #[test]
    fn test_case_incurred_selection() {
        let selected = [1.460, 1.270, 1.030, 1.020, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let cdfs = calculate_cdfs(&selected, CdfRounding::Stepwise);
        assert_eq!(&cdfs[6..], &[1.02, 1.051, 1.335, 1.949]);
    }

    #[test]
    fn test_validate_selection_length() {
        let err = validate_selection(&MeasureType::Paid, &PAID_SELECTED, 11).unwrap_err();
        assert!(matches!(
            err,
            IndicationError::SelectionLength { expected: 11, actual: 10, .. }
        ));
        assert!(validate_selection(&MeasureType::Paid, &PAID_SELECTED, 10).is_ok());
    }

    #[test]
    fn test_validate_selection_values() {
        let err = validate_selection(&MeasureType::Paid, &[1.2, 0.0, 1.0], 3).unwrap_err();
        assert!(matches!(err, IndicationError::InvalidSelection { position: 1, .. }));
        assert!(validate_selection(&MeasureType::Paid, &[1.2, f64::NAN, 1.0], 3).is_err());
    }
}
