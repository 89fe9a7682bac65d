//! Latest diagonal of a triangle

use crate::error::{IndicationError, Result};
use crate::triangle::Triangle;

/// Age column holding the latest observation of the origin at `origin_rank`
///
/// Origin rank 0 (oldest) maps to the oldest age, each younger origin one age
/// earlier. `None` when the triangle has fewer ages than the rank needs.
pub fn diagonal_age_index(origin_rank: usize, age_count: usize) -> Option<usize> {
    age_count.checked_sub(origin_rank + 1)
}

/// Most mature value of each origin period, oldest origin first
///
/// Each origin must be populated exactly up to its diagonal age: an empty
/// diagonal cell or a value beyond it means the triangle is not a staircase.
pub fn latest_diagonal(triangle: &Triangle) -> Result<Vec<f64>> {
    let age_count = triangle.ages().len();
    if triangle.periods() > age_count {
        return Err(IndicationError::LengthMismatch {
            what: "development ages for diagonal",
            expected: triangle.periods(),
            actual: age_count,
        });
    }

    (0..triangle.periods())
        .map(|row| {
            let column = diagonal_age_index(row, age_count).ok_or_else(|| IndicationError::LengthMismatch {
                what: "development ages for diagonal",
                expected: triangle.periods(),
                actual: age_count,
            })?;
            let value = triangle.value_at(row, column)?;

            if let Some(latest) = triangle.latest_populated(row) {
                if latest > column {
                    return Err(IndicationError::NotStaircase {
                        measure: triangle.measure().clone(),
                        origin: triangle.origins()[row],
                        expected_age: triangle.ages()[column],
                        populated_age: triangle.ages()[latest],
                    });
                }
            }

            Ok(value)
        })
        .collect()
}
