//! Age-to-age loss development factors
//!
//! For each transition from [`period_windows`], only the origin periods that
//! have reached the older age take part: the last `|lag|` rows are dropped.

use super::windows::{period_windows, PeriodWindow};
use crate::error::{checked_ratio, Result};
use crate::rounding::round3;
use crate::triangle::{MeasureType, Triangle};
use log::{debug, info, warn};
use serde::Serialize;

/// Factors for one age-to-age transition
#[derive(Debug, Clone, Serialize)]
pub struct TransitionFactors {
    pub window: PeriodWindow,
    /// Per-origin factors, oldest origin first
    pub factors: Vec<f64>,
    /// Unweighted mean of `factors`
    pub simple_average: f64,
    /// Sum of older-age values over sum of younger-age values
    pub weighted_average: f64,
}

/// Development diagnostics for one measurement type
#[derive(Debug, Clone, Serialize)]
pub struct LdfSummary {
    pub measure: MeasureType,
    pub age_length: u32,
    pub transitions: Vec<TransitionFactors>,
}

impl LdfSummary {
    pub fn factors(&self) -> Vec<Vec<f64>> {
        self.transitions.iter().map(|t| t.factors.clone()).collect()
    }

    pub fn simple_averages(&self) -> Vec<f64> {
        self.transitions.iter().map(|t| t.simple_average).collect()
    }

    pub fn weighted_averages(&self) -> Vec<f64> {
        self.transitions.iter().map(|t| t.weighted_average).collect()
    }

    /// Transition labels such as "12-24"
    pub fn labels(&self) -> Vec<String> {
        self.transitions
            .iter()
            .map(|t| t.window.label(self.age_length))
            .collect()
    }
}

fn transition_factors(triangle: &Triangle, window: &PeriodWindow, age_length: u32) -> Result<Vec<f64>> {
    let prior_age = window.prior_age(age_length);
    let rows = window.mature_rows(triangle.periods());

    (0..rows)
        .map(|row| {
            let current = triangle.value(row, window.age)?;
            let prior = triangle.value(row, prior_age)?;
            let factor = checked_ratio(current, prior, || {
                format!(
                    "{} origin {} age {}-{}",
                    triangle.measure(),
                    triangle.origins()[row],
                    prior_age,
                    window.age
                )
            })?;
            Ok(round3(factor))
        })
        .collect()
}

fn pooled_factor(triangle: &Triangle, window: &PeriodWindow, age_length: u32) -> Result<f64> {
    let prior_age = window.prior_age(age_length);
    let rows = window.mature_rows(triangle.periods());

    let mut current_sum = 0.0;
    let mut prior_sum = 0.0;
    for row in 0..rows {
        current_sum += triangle.value(row, window.age)?;
        prior_sum += triangle.value(row, prior_age)?;
    }

    let factor = checked_ratio(current_sum, prior_sum, || {
        format!("{} weighted age {}-{}", triangle.measure(), prior_age, window.age)
    })?;
    Ok(round3(factor))
}

/// Per-origin factors for every transition, each rounded to 3 decimals
///
/// Transition `i` (0-indexed) yields `periods - 1 - i` factors.
pub fn simple_average_ldfs(triangle: &Triangle, first_age: u32, age_length: u32) -> Result<Vec<Vec<f64>>> {
    period_windows(first_age, age_length, triangle.periods())
        .iter()
        .map(|window| transition_factors(triangle, window, age_length))
        .collect()
}

/// One pooled (volume-weighted) factor per transition, rounded to 3 decimals
pub fn weighted_average_ldfs(triangle: &Triangle, first_age: u32, age_length: u32) -> Result<Vec<f64>> {
    period_windows(first_age, age_length, triangle.periods())
        .iter()
        .map(|window| pooled_factor(triangle, window, age_length))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute all development diagnostics for one triangle
pub fn calculate_ldfs(triangle: &Triangle, first_age: u32, age_length: u32) -> Result<LdfSummary> {
    let windows = period_windows(first_age, age_length, triangle.periods());
    let mut transitions = Vec::with_capacity(windows.len());

    for window in windows {
        let factors = transition_factors(triangle, &window, age_length)?;
        let weighted_average = pooled_factor(triangle, &window, age_length)?;
        let simple_average = round3(mean(&factors));

        if factors.iter().any(|&f| f < 1.0) {
            warn!(
                "{} {} has factors below 1.0: {:?}",
                triangle.measure(),
                window.label(age_length),
                factors
            );
        }
        debug!(
            "{} {}: {:?} simple={} weighted={}",
            triangle.measure(),
            window.label(age_length),
            factors,
            simple_average,
            weighted_average
        );

        transitions.push(TransitionFactors {
            window,
            factors,
            simple_average,
            weighted_average,
        });
    }

    info!(
        "Computed {} development transitions for {} ({} origin periods)",
        transitions.len(),
        triangle.measure(),
        triangle.periods()
    );

    Ok(LdfSummary {
        measure: triangle.measure().clone(),
        age_length,
        transitions,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::IndicationError;
    use approx::assert_abs_diff_eq;

    /// 4x4 staircase used across the development tests
    pub(crate) fn staircase(measure: MeasureType) -> Triangle {
        Triangle::new(
            measure,
            vec![2017, 2018, 2019, 2020],
            vec![12, 24, 36, 48],
            vec![
                vec![Some(100.0), Some(200.0), Some(250.0), Some(260.0)],
                vec![Some(110.0), Some(231.0), Some(286.0), None],
                vec![Some(120.0), Some(240.0), None, None],
                vec![Some(130.0), None, None, None],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_simple_average_sequences() {
        let ldfs = simple_average_ldfs(&staircase(MeasureType::Paid), 12, 12).unwrap();
        assert_eq!(ldfs, vec![vec![2.0, 2.1, 2.0], vec![1.25, 1.238], vec![1.04]]);
    }

    #[test]
    fn test_sequence_lengths_shrink() {
        let tri = staircase(MeasureType::Paid);
        let ldfs = simple_average_ldfs(&tri, 12, 12).unwrap();
        for (i, seq) in ldfs.iter().enumerate() {
            assert_eq!(seq.len(), tri.periods() - 1 - i);
        }
    }

    #[test]
    fn test_weighted_average() {
        let weighted = weighted_average_ldfs(&staircase(MeasureType::Paid), 12, 12).unwrap();
        assert_eq!(weighted, vec![2.033, 1.244, 1.04]);
    }

    #[test]
    fn test_summary_averages() {
        let summary = calculate_ldfs(&staircase(MeasureType::Paid), 12, 12).unwrap();
        let simple = summary.simple_averages();
        assert_abs_diff_eq!(simple[0], 2.033, epsilon = 1e-12);
        assert_abs_diff_eq!(simple[1], 1.244, epsilon = 1e-12);
        assert_abs_diff_eq!(simple[2], 1.04, epsilon = 1e-12);
        assert_eq!(summary.labels(), vec!["12-24", "24-36", "36-48"]);
    }

    #[test]
    fn test_age_sequence_mismatch_is_shape_error() {
        // Ages spaced by 6 do not exist in a 12-month triangle
        let err = simple_average_ldfs(&staircase(MeasureType::Paid), 12, 6).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_zero_denominator_fails() {
        let tri = Triangle::new(
            MeasureType::Paid,
            vec![2019, 2020],
            vec![12, 24],
            vec![vec![Some(0.0), Some(50.0)], vec![Some(10.0), None]],
        )
        .unwrap();
        assert!(matches!(
            simple_average_ldfs(&tri, 12, 12),
            Err(IndicationError::DegenerateRatio { .. })
        ));
        assert!(matches!(
            weighted_average_ldfs(&tri, 12, 12),
            Err(IndicationError::DegenerateRatio { .. })
        ));
    }
}
