//! Reserve projections for single policies and portfolio snapshots

mod rows;
mod engine;

pub use rows::{
    PortfolioValuation, PortfolioValuationEntry, ProjectionResult, ProjectionRow, ProjectionSummary,
};
pub use engine::{ValuationConfig, ValuationService};
