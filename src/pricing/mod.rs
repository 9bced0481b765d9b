//! Premium calculation for the term-assurance product
//!
//! - **Net premium**: `S · Ā / ā`, the level rate that makes the expected
//!   present value of benefits equal that of premiums
//! - **Gross quote**: net premium plus expense loadings, scaled by the
//!   applicant's risk loading multiplier, with an insurability decision

pub mod premium;
mod types;

pub use premium::{loading_multiplier, PremiumCalculator, MIN_ANNUITY_FACTOR};
pub use types::{Applicant, HistoryCategory, Quote, RiskCategory};
