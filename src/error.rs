//! Error types for triangle development and indication runs
//!
//! Every failure is fatal for a run: shape problems in the triangle,
//! degenerate ratios, and selections that do not line up with the data.

use crate::triangle::MeasureType;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, IndicationError>;

#[derive(Debug, Error)]
pub enum IndicationError {
    /// A development age column was requested that the triangle does not carry
    #[error("{measure} triangle has no development age column {age}")]
    MissingAge { measure: MeasureType, age: u32 },

    /// The age column exists but the cell for this origin period is empty
    #[error("{measure} triangle has no value for origin {origin} at age {age}")]
    MissingValue {
        measure: MeasureType,
        origin: i32,
        age: u32,
    },

    /// Origin period has observations past the age its rank allows
    #[error("{measure} origin {origin} is observed beyond its diagonal age {expected_age} (latest populated age {populated_age})")]
    NotStaircase {
        measure: MeasureType,
        origin: i32,
        expected_age: u32,
        populated_age: u32,
    },

    #[error("no {0} rows in the triangle dataset")]
    UnknownMeasure(MeasureType),

    /// Zero, negative-zero, or non-finite denominator (or result) in a ratio
    #[error("degenerate ratio for {context}: {numerator} / {denominator}")]
    DegenerateRatio {
        context: String,
        numerator: f64,
        denominator: f64,
    },

    #[error("{measure} selection has {actual} factors, triangle with {periods} origin periods needs {expected}")]
    SelectionLength {
        measure: MeasureType,
        periods: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{measure} selected factor #{position} is {value}; factors must be finite and positive")]
    InvalidSelection {
        measure: MeasureType,
        position: usize,
        value: f64,
    },

    /// Two triangles disagree on their origin periods
    #[error("{left} and {right} triangles disagree on origin periods")]
    OriginMismatch { left: MeasureType, right: MeasureType },

    #[error("{what}: expected {expected} values, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid header in triangle file: {0}")]
    InvalidHeader(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not parse {field} value {value:?}")]
    Parse { field: String, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IndicationError {
    /// True for errors caused by the triangle not having the assumed shape
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            IndicationError::MissingAge { .. }
                | IndicationError::MissingValue { .. }
                | IndicationError::NotStaircase { .. }
        )
    }
}

/// Divide, failing on a zero or non-finite denominator or result
pub(crate) fn checked_ratio(numerator: f64, denominator: f64, context: impl FnOnce() -> String) -> Result<f64> {
    let ratio = numerator / denominator;
    if denominator == 0.0 || !denominator.is_finite() || !ratio.is_finite() {
        return Err(IndicationError::DegenerateRatio {
            context: context(),
            numerator,
            denominator,
        });
    }
    Ok(ratio)
}
