//! Numerical integration of discounted, survival-weighted cashflows

mod simpson;
mod integrands;

pub use simpson::{integrate, SimpsonIntegrator};
pub use integrands::{CashflowFactors, CashflowIntegrands, FactorCalculator};
