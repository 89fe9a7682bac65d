//! Indication engine: ultimates, trend, and the indicated rate change

mod rows;
mod engine;

pub use rows::{
    aggregate, net_trend_factors, selected_ultimate, IndicationRow, PortfolioIndication, RowInputs,
};
pub use engine::{IndicationEngine, IndicationReport};
