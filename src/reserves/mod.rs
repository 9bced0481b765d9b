//! Prospective reserves for in-force term-assurance policies
//!
//! - **Engine**: values a policy at any duration against the net premium
//!   fixed at issue
//! - **Cache**: issue factors per (issue age, term) so portfolio runs solve
//!   each net premium once
//!
//! # Example
//!
//! ```rust,ignore
//! use term_valuation::reserves::ReserveEngine;
//! use term_valuation::ActuarialAssumptions;
//!
//! let engine = ReserveEngine::new(ActuarialAssumptions::default_pricing());
//! let reserve = engine.reserve_at(&policy, 5.0)?;
//! println!("Reserve: {:.2}", reserve);
//! ```

mod types;
mod cache;
mod engine;

pub use types::{IssueFactors, ReserveValue};
pub use cache::{IssueCell, IssueFactorCache};
pub use engine::ReserveEngine;
