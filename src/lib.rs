//! Rate Indication - loss triangle development and indicated rate change
//!
//! This library provides:
//! - Loading paid, case incurred and earned premium triangles from CSV
//! - Age-to-age development factors (simple and volume-weighted averages)
//! - Cumulative development factors from externally selected factors
//! - Latest-diagonal extraction, ultimate projection, trend and blending
//! - The portfolio trended loss ratio and indicated rate change

pub mod config;
pub mod development;
pub mod error;
pub mod indication;
pub mod rounding;
pub mod triangle;

// Re-export commonly used types
pub use config::IndicationConfig;
pub use development::{CdfRounding, LdfSummary, PeriodWindow};
pub use error::{IndicationError, Result};
pub use indication::{IndicationEngine, IndicationReport, IndicationRow, PortfolioIndication};
pub use triangle::{MeasureType, Triangle, TriangleSet};
