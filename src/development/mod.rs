//! Triangle development: age-to-age factors, cumulative factors, and the
//! latest diagonal
//!
//! The flow for one measurement type is:
//! 1. [`period_windows`] lists the age-to-age transitions and how many
//!    immature origin periods each one excludes
//! 2. [`calculate_ldfs`] computes per-origin factors plus simple and weighted
//!    averages for every transition (diagnostics for an external selection)
//! 3. [`calculate_cdfs`] turns the selected factors into one cumulative
//!    factor per origin period
//! 4. [`latest_diagonal`] reads each origin period's most mature value

mod windows;
mod factors;
mod cumulative;
mod diagonal;

pub use windows::{period_windows, PeriodWindow};
pub use factors::{
    calculate_ldfs, simple_average_ldfs, weighted_average_ldfs, LdfSummary, TransitionFactors,
};
pub use cumulative::{calculate_cdfs, validate_selection, CdfRounding};
pub use diagonal::{diagonal_age_index, latest_diagonal};
