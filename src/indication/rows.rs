//! Per-origin indication rows and the portfolio aggregate

use crate::error::{checked_ratio, IndicationError, Result};
use crate::rounding::{round3, round_to_tens};
use serde::{Deserialize, Serialize};

/// Observed values and factors for one origin period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowInputs {
    pub origin: i32,
    pub earned_premium: f64,
    pub current_paid: f64,
    pub paid_cdf: f64,
    pub current_case_incurred: f64,
    pub case_incurred_cdf: f64,
    pub net_trend: f64,
}

/// One line of the indication table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicationRow {
    pub origin: i32,
    pub earned_premium: f64,
    pub current_paid: f64,
    pub paid_cdf: f64,
    pub paid_ultimate: f64,
    pub current_case_incurred: f64,
    pub case_incurred_cdf: f64,
    pub case_incurred_ultimate: f64,
    pub selected_ultimate: f64,
    pub net_trend: f64,
    pub trended_ultimate_ratio: f64,
}

impl IndicationRow {
    /// Project, blend and trend one origin period
    pub fn from_inputs(inputs: RowInputs, blend_cutoff_year: i32) -> Result<Self> {
        let paid_ultimate = round_to_tens(inputs.current_paid * inputs.paid_cdf);
        let case_incurred_ultimate = round_to_tens(inputs.current_case_incurred * inputs.case_incurred_cdf);
        let selected_ultimate = selected_ultimate(
            inputs.origin,
            paid_ultimate,
            case_incurred_ultimate,
            blend_cutoff_year,
        );

        let ratio = checked_ratio(
            selected_ultimate * inputs.net_trend,
            inputs.earned_premium,
            || format!("trended ultimate ratio for origin {}", inputs.origin),
        )?;

        Ok(Self {
            origin: inputs.origin,
            earned_premium: inputs.earned_premium,
            current_paid: inputs.current_paid,
            paid_cdf: inputs.paid_cdf,
            paid_ultimate,
            current_case_incurred: inputs.current_case_incurred,
            case_incurred_cdf: inputs.case_incurred_cdf,
            case_incurred_ultimate,
            selected_ultimate,
            net_trend: inputs.net_trend,
            trended_ultimate_ratio: round3(ratio),
        })
    }

    /// Selected ultimate restated at the future cost level
    pub fn trended_ultimate(&self) -> f64 {
        self.selected_ultimate * self.net_trend
    }
}

/// Case incurred only before the cutoff year, the mean of both methods after
pub fn selected_ultimate(origin: i32, paid_ultimate: f64, case_incurred_ultimate: f64, blend_cutoff_year: i32) -> f64 {
    if origin < blend_cutoff_year {
        case_incurred_ultimate
    } else {
        (paid_ultimate + case_incurred_ultimate) / 2.0
    }
}

/// Compounded trend per origin period, oldest first
///
/// The oldest of `periods` origins is trended `periods + 1` years, the
/// youngest 2 years. Each factor is rounded to 3 decimals.
pub fn net_trend_factors(trend_factor: f64, periods: usize) -> Vec<f64> {
    (2..periods as i32 + 2)
        .rev()
        .map(|years| round3((1.0 + trend_factor).powi(years)))
        .collect()
}

/// Portfolio-level result of an indication run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioIndication {
    pub rows: Vec<IndicationRow>,
    pub total_trended_ultimate_ratio: f64,
    pub permissible_loss_ratio: f64,
    /// Indicated rate change, e.g. 0.415 for +41.5%
    pub indication: f64,
}

impl PortfolioIndication {
    pub fn total_earned_premium(&self) -> f64 {
        self.rows.iter().map(|r| r.earned_premium).sum()
    }

    pub fn total_trended_ultimate(&self) -> f64 {
        self.rows.iter().map(IndicationRow::trended_ultimate).sum()
    }
}

/// Pool the rows into a trended loss ratio and compare it to the target
pub fn aggregate(rows: Vec<IndicationRow>, permissible_loss_ratio: f64) -> Result<PortfolioIndication> {
    if rows.is_empty() {
        return Err(IndicationError::LengthMismatch {
            what: "indication rows",
            expected: 1,
            actual: 0,
        });
    }

    let trended: f64 = rows.iter().map(IndicationRow::trended_ultimate).sum();
    let premium: f64 = rows.iter().map(|r| r.earned_premium).sum();

    let total_trended_ultimate_ratio = round3(checked_ratio(trended, premium, || {
        "total trended ultimate ratio".to_string()
    })?);
    let indication = round3(
        checked_ratio(total_trended_ultimate_ratio, permissible_loss_ratio, || {
            "permissible loss ratio".to_string()
        })? - 1.0,
    );

    Ok(PortfolioIndication {
        rows,
        total_trended_ultimate_ratio,
        permissible_loss_ratio,
        indication,
    })
}
