//! Run configuration for an indication
//!
//! All constants of a run live here and are passed into the engine. The
//! default reproduces the reference accident-year indication.

use crate::development::CdfRounding;
use crate::error::{IndicationError, Result};
use crate::triangle::TriangleLayout;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default path to the triangle dataset
pub const DEFAULT_DATA_FILE: &str = "data/indication_data.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicationConfig {
    /// Triangle dataset (CSV)
    pub data_file: PathBuf,

    /// Column discriminating paid / case_incurred / earned_premium rows
    pub type_column: String,

    /// Origin period column, e.g. "AY" for accident years
    pub index_column: String,

    /// First development age in months
    pub first_age: u32,

    /// Spacing between development ages in months
    pub age_length: u32,

    /// Annual loss trend, compounded
    pub trend_factor: f64,

    /// Target loss ratio the rate should sustain
    pub permissible_loss_ratio: f64,

    /// Origin periods before this year use case incurred ultimates only
    pub blend_cutoff_year: i32,

    pub cdf_rounding: CdfRounding,

    /// Selected paid factors, youngest transition first, tail last
    pub paid_selected_ldfs: Vec<f64>,

    /// Selected case incurred factors, youngest transition first, tail last
    pub case_incurred_selected_ldfs: Vec<f64>,
}

impl Default for IndicationConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            type_column: "Type".to_string(),
            index_column: "AY".to_string(),
            first_age: 12,
            age_length: 12,
            trend_factor: 0.015,
            permissible_loss_ratio: 0.55,
            blend_cutoff_year: 2017,
            cdf_rounding: CdfRounding::Stepwise,
            paid_selected_ldfs: vec![1.830, 1.440, 1.090, 1.020, 1.010, 1.0, 1.010, 1.0, 1.0, 1.0],
            case_incurred_selected_ldfs: vec![1.460, 1.270, 1.030, 1.020, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl IndicationConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn layout(&self) -> TriangleLayout {
        TriangleLayout {
            type_column: self.type_column.clone(),
            index_column: self.index_column.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_age == 0 || self.age_length == 0 {
            return Err(IndicationError::InvalidConfig(format!(
                "development ages must be positive (first_age={}, age_length={})",
                self.first_age, self.age_length
            )));
        }
        if !self.trend_factor.is_finite() || self.trend_factor <= -1.0 {
            return Err(IndicationError::InvalidConfig(format!(
                "trend_factor {} must be finite and above -1",
                self.trend_factor
            )));
        }
        if !self.permissible_loss_ratio.is_finite() || self.permissible_loss_ratio <= 0.0 {
            return Err(IndicationError::InvalidConfig(format!(
                "permissible_loss_ratio {} must be positive",
                self.permissible_loss_ratio
            )));
        }
        Ok(())
    }
}
