//! Policy data structures matching the inforce extract

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{require, Result};

/// Administrative status of the policy, owned by policy administration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyStatus {
    InForce,
    Lapsed,
    Matured,
    Claimed,
}

impl PolicyStatus {
    /// Parse the status labels used in the inforce extract
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "inforce" | "in force" | "active" => Some(PolicyStatus::InForce),
            "lapsed" => Some(PolicyStatus::Lapsed),
            "matured" => Some(PolicyStatus::Matured),
            "claimed" => Some(PolicyStatus::Claimed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::InForce => "InForce",
            PolicyStatus::Lapsed => "Lapsed",
            PolicyStatus::Matured => "Matured",
            PolicyStatus::Claimed => "Claimed",
        }
    }
}

/// A term-assurance policy record
///
/// Read-only to the engine: valuation never writes back to the record.
/// Issue age and term are whole years, as held in the inforce extract, so a
/// policy cannot carry a fractional issue age or term. Fractional ages and
/// terms can still be priced with [`crate::pricing::PremiumCalculator`], and
/// reserves accept fractional elapsed durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    pub policy_id: u32,

    /// Age of the life assured at inception, in whole years
    pub issue_age: u32,

    /// Policy term in whole years
    pub term: u32,

    /// Death benefit
    pub sum_insured: f64,

    pub inception_date: NaiveDate,

    pub status: PolicyStatus,
}

impl Policy {
    /// Create an in-force policy
    pub fn new(
        policy_id: u32,
        issue_age: u32,
        term: u32,
        sum_insured: f64,
        inception_date: NaiveDate,
    ) -> Self {
        Self {
            policy_id,
            issue_age,
            term,
            sum_insured,
            inception_date,
            status: PolicyStatus::InForce,
        }
    }

    /// Same policy with a different status
    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_in_force(&self) -> bool {
        self.status == PolicyStatus::InForce
    }

    /// Check the attributes the engine relies on
    pub fn validate(&self) -> Result<()> {
        require!(self.term > 0, "policy {}: term must be > 0", self.policy_id);
        require!(
            self.sum_insured.is_finite() && self.sum_insured > 0.0,
            "policy {}: sum insured must be > 0, got {}",
            self.policy_id,
            self.sum_insured
        );
        Ok(())
    }

    /// Attained age after `elapsed_years` policy years
    pub fn attained_age(&self, elapsed_years: u32) -> u32 {
        self.issue_age.saturating_add(elapsed_years)
    }

    /// Years of cover left after `elapsed_years`, zero once matured
    pub fn remaining_term(&self, elapsed_years: u32) -> u32 {
        self.term.saturating_sub(elapsed_years)
    }

    /// Whole policy years completed at `valuation_date`
    ///
    /// A year is counted on each policy anniversary. Valuation dates before
    /// inception give 0.
    pub fn elapsed_years(&self, valuation_date: NaiveDate) -> u32 {
        let inception = self.inception_date;
        let mut years = valuation_date.year() - inception.year();
        if (valuation_date.month(), valuation_date.day()) < (inception.month(), inception.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}
