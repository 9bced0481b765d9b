//! Term Valuation - actuarial valuation engine for level-premium term assurance
//!
//! This library provides:
//! - Gompertz-Makeham survival modelling
//! - Composite Simpson quadrature of discounted, survival-weighted cashflows
//! - Net premiums and gross quotes under the equivalence principle
//! - Prospective reserves at any duration, year-by-year projections and
//!   portfolio snapshots
//! - Multi-basis scenario runs

pub mod error;
pub mod assumptions;
pub mod integration;
pub mod pricing;
pub mod reserves;
pub mod policy;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{Result, ValuationError};
pub use policy::Policy;
pub use assumptions::{ActuarialAssumptions, MakehamParams, MortalityModel};
pub use pricing::{Applicant, HistoryCategory, PremiumCalculator, Quote, RiskCategory};
pub use reserves::ReserveEngine;
pub use projection::{PortfolioValuation, ProjectionResult, ValuationConfig, ValuationService};
pub use scenario::ScenarioRunner;
