//! Core types for reserve calculations

use serde::{Deserialize, Serialize};

/// Prospective policy value at one duration, with the factors behind it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReserveValue {
    /// Duration since inception in years (clamped to >= 0)
    pub elapsed_years: f64,

    /// Issue age plus elapsed duration
    pub attained_age: f64,

    /// Term left to run, zero once matured
    pub remaining_term: f64,

    /// Assurance factor over the remaining term
    pub assurance_factor: f64,

    /// Annuity factor over the remaining term at the valuation rate
    pub annuity_factor: f64,

    /// Expected present value of future loss: S·Ā − P'·ā
    pub reserve: f64,
}

impl ReserveValue {
    /// Value of a policy with no cover left to run
    pub fn matured(elapsed_years: f64, attained_age: f64) -> Self {
        Self {
            elapsed_years,
            attained_age,
            remaining_term: 0.0,
            assurance_factor: 0.0,
            annuity_factor: 0.0,
            reserve: 0.0,
        }
    }

    pub fn is_matured(&self) -> bool {
        self.remaining_term <= 0.0
    }
}

/// Issue-date factors a net premium is solved from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IssueFactors {
    pub assurance: f64,
    pub annuity: f64,
}
