//! Triangle data structures

use crate::error::{IndicationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Measurement type discriminating the logical tables of a triangle file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureType {
    Paid,
    CaseIncurred,
    EarnedPremium,
    /// Any other discriminator value found in the file
    Other(String),
}

impl MeasureType {
    pub fn as_str(&self) -> &str {
        match self {
            MeasureType::Paid => "paid",
            MeasureType::CaseIncurred => "case_incurred",
            MeasureType::EarnedPremium => "earned_premium",
            MeasureType::Other(name) => name,
        }
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "paid" => MeasureType::Paid,
            "case_incurred" => MeasureType::CaseIncurred,
            "earned_premium" => MeasureType::EarnedPremium,
            other => MeasureType::Other(other.to_string()),
        })
    }
}

/// A ragged triangle for one measurement type
///
/// Rows are origin periods in file order (oldest first), columns are
/// development ages youngest first. Absent cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    measure: MeasureType,
    origins: Vec<i32>,
    ages: Vec<u32>,
    values: Vec<Vec<Option<f64>>>,
}

impl Triangle {
    /// Build a triangle; every row must have one cell per age
    pub fn new(
        measure: MeasureType,
        origins: Vec<i32>,
        ages: Vec<u32>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if values.len() != origins.len() {
            return Err(IndicationError::LengthMismatch {
                what: "triangle rows",
                expected: origins.len(),
                actual: values.len(),
            });
        }
        if let Some(row) = values.iter().find(|row| row.len() != ages.len()) {
            return Err(IndicationError::LengthMismatch {
                what: "triangle row cells",
                expected: ages.len(),
                actual: row.len(),
            });
        }

        Ok(Self {
            measure,
            origins,
            ages,
            values,
        })
    }

    pub fn measure(&self) -> &MeasureType {
        &self.measure
    }

    /// Origin period keys, oldest first
    pub fn origins(&self) -> &[i32] {
        &self.origins
    }

    /// Development ages, youngest first
    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    /// Number of origin periods (rows)
    pub fn periods(&self) -> usize {
        self.origins.len()
    }

    /// Column position of a development age
    pub fn age_index(&self, age: u32) -> Result<usize> {
        self.ages
            .iter()
            .position(|&a| a == age)
            .ok_or_else(|| IndicationError::MissingAge {
                measure: self.measure.clone(),
                age,
            })
    }

    /// Raw cell lookup by position
    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Value for the origin at `row` at development `age`
    ///
    /// Fails if the age column does not exist or the cell is empty.
    pub fn value(&self, row: usize, age: u32) -> Result<f64> {
        let column = self.age_index(age)?;
        self.value_at(row, column)
    }

    /// Value by row and column position, failing on an empty cell
    pub fn value_at(&self, row: usize, column: usize) -> Result<f64> {
        self.cell(row, column).ok_or_else(|| IndicationError::MissingValue {
            measure: self.measure.clone(),
            origin: self.origins.get(row).copied().unwrap_or_default(),
            age: self.ages.get(column).copied().unwrap_or_default(),
        })
    }

    /// Position of the most mature populated age for a row
    pub fn latest_populated(&self, row: usize) -> Option<usize> {
        self.values
            .get(row)
            .and_then(|cells| cells.iter().rposition(Option::is_some))
    }
}

/// All triangles of a dataset, keyed by measurement type
#[derive(Debug, Clone, Default)]
pub struct TriangleSet {
    triangles: BTreeMap<MeasureType, Triangle>,
}

impl TriangleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the triangle for its measure
    pub fn insert(&mut self, triangle: Triangle) {
        self.triangles.insert(triangle.measure().clone(), triangle);
    }

    pub fn get(&self, measure: &MeasureType) -> Result<&Triangle> {
        self.triangles
            .get(measure)
            .ok_or_else(|| IndicationError::UnknownMeasure(measure.clone()))
    }

    pub fn measures(&self) -> impl Iterator<Item = &MeasureType> {
        self.triangles.keys()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
