//! Scenario runner for assumption sensitivities
//!
//! Pre-loads a base assumption set once, then prices applicants or projects
//! policies under it and under any number of variant bases (interest
//! sensitivities, alternative mortality laws) without re-reading CSV files.

use std::path::Path;

use crate::assumptions::ActuarialAssumptions;
use crate::error::Result;
use crate::policy::Policy;
use crate::pricing::{Applicant, PremiumCalculator, Quote};
use crate::projection::{ProjectionResult, ValuationConfig, ValuationService};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// let bases: Vec<_> = [0.03, 0.04, 0.05]
///     .iter()
///     .map(|&rate| runner.with_interest_rate(rate))
///     .collect::<Result<_>>()?;
/// let quotes = runner.run_quote_scenarios(&applicant, &bases)?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded base assumptions
    base_assumptions: ActuarialAssumptions,
}

impl ScenarioRunner {
    /// Create runner with the default in-memory basis
    pub fn new() -> Self {
        Self {
            base_assumptions: ActuarialAssumptions::default_pricing(),
        }
    }

    /// Create runner by loading the basis from the default CSV directory
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            base_assumptions: ActuarialAssumptions::from_csv()?,
        })
    }

    /// Create runner from a specific assumptions directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            base_assumptions: ActuarialAssumptions::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: ActuarialAssumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Base basis with the valuation rate replaced
    pub fn with_interest_rate(&self, rate: f64) -> Result<ActuarialAssumptions> {
        self.base_assumptions.with_valuation_rate(rate)
    }

    /// Quote an applicant under the base basis
    pub fn quote(&self, applicant: &Applicant) -> Result<Quote> {
        PremiumCalculator::new(self.base_assumptions.clone()).quote_standard(applicant)
    }

    /// Quote the same applicant under each basis, in order
    pub fn run_quote_scenarios(
        &self,
        applicant: &Applicant,
        scenarios: &[ActuarialAssumptions],
    ) -> Result<Vec<Quote>> {
        scenarios
            .iter()
            .map(|basis| PremiumCalculator::new(basis.clone()).quote_standard(applicant))
            .collect()
    }

    /// Project a single policy under the base basis
    pub fn run(&self, policy: &Policy) -> Result<ProjectionResult> {
        self.service(self.base_assumptions.clone()).project_policy(policy)
    }

    /// Project several policies under the base basis
    pub fn run_batch(&self, policies: &[Policy]) -> Result<Vec<ProjectionResult>> {
        let service = self.service(self.base_assumptions.clone());
        policies.iter().map(|p| service.project_policy(p)).collect()
    }

    /// Project one policy under each basis, in order
    pub fn run_scenarios(
        &self,
        policy: &Policy,
        scenarios: &[ActuarialAssumptions],
    ) -> Result<Vec<ProjectionResult>> {
        scenarios
            .iter()
            .map(|basis| self.service(basis.clone()).project_policy(policy))
            .collect()
    }

    /// Interest sensitivity of an applicant's quote
    pub fn interest_sensitivity(&self, applicant: &Applicant, rates: &[f64]) -> Result<Vec<Quote>> {
        let scenarios = rates
            .iter()
            .map(|&rate| self.with_interest_rate(rate))
            .collect::<Result<Vec<_>>>()?;
        self.run_quote_scenarios(applicant, &scenarios)
    }

    pub fn assumptions(&self) -> &ActuarialAssumptions {
        &self.base_assumptions
    }

    fn service(&self, assumptions: ActuarialAssumptions) -> ValuationService {
        ValuationService::new(assumptions, ValuationConfig::default())
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
