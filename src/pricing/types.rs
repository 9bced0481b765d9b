//! Underwriting inputs and the quote returned to the issuance workflow

use serde::{Deserialize, Serialize};

/// Medical history disclosed on the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryCategory {
    #[default]
    Clean,
    Minor,
    Major,
}

impl HistoryCategory {
    /// Parse the labels used in the issuance workflow and inforce files
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "clean" | "none" => Some(HistoryCategory::Clean),
            "minor" => Some(HistoryCategory::Minor),
            "major" => Some(HistoryCategory::Major),
            _ => None,
        }
    }
}

/// Risk class reported with a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// High if major history; Medium if smoker or minor history; otherwise Low
    pub fn classify(smoker: bool, history: HistoryCategory) -> Self {
        match (smoker, history) {
            (_, HistoryCategory::Major) => RiskCategory::High,
            (true, _) | (_, HistoryCategory::Minor) => RiskCategory::Medium,
            (false, HistoryCategory::Clean) => RiskCategory::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

/// New-business request from the issuance workflow, priced at the standard term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub age: f64,
    pub coverage: f64,
    pub smoker: bool,
    pub history: HistoryCategory,
}

/// Gross premium quote
///
/// Always fully populated, even when `approved` is false, so a declined risk
/// can be explained. Issuance is gated on `approved` by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub age: f64,
    pub term: f64,
    pub coverage: f64,

    /// EPV of a unit death benefit over the term
    pub assurance_factor: f64,

    /// EPV of a unit continuous annuity at the valuation rate
    pub annuity_factor: f64,

    /// EPV of a unit continuous annuity at the expense rate
    pub annuity_in_factor: f64,

    /// Annual premium including expenses, before risk loadings
    pub base_annual_premium: f64,

    /// 1.0 plus the additive risk loadings
    pub loading_multiplier: f64,

    pub annual_premium: f64,
    pub monthly_premium: f64,
    pub risk_category: RiskCategory,
    pub approved: bool,
}
