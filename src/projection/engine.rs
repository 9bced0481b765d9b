//! Valuation service: year-by-year projections and portfolio snapshots

use chrono::NaiveDate;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::rows::{PortfolioValuation, PortfolioValuationEntry, ProjectionResult, ProjectionRow};
use crate::assumptions::ActuarialAssumptions;
use crate::error::Result;
use crate::policy::Policy;
use crate::reserves::{IssueFactorCache, ReserveEngine};

/// Configuration for portfolio runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuationConfig {
    /// Value policies on the rayon thread pool
    pub parallel: bool,

    /// Memoise issue factors per (issue age, term); one cache per worker
    /// when running in parallel
    pub use_cache: bool,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            use_cache: false,
        }
    }
}

impl ValuationConfig {
    /// Single-threaded run sharing one issue-factor cache
    pub fn sequential_cached() -> Self {
        Self {
            parallel: false,
            use_cache: true,
        }
    }
}

/// Orchestrates the reserve engine over a policy's term and across a portfolio
#[derive(Debug, Clone)]
pub struct ValuationService {
    reserves: ReserveEngine,
    config: ValuationConfig,
}

impl ValuationService {
    pub fn new(assumptions: ActuarialAssumptions, config: ValuationConfig) -> Self {
        Self {
            reserves: ReserveEngine::new(assumptions),
            config,
        }
    }

    pub fn assumptions(&self) -> &ActuarialAssumptions {
        self.reserves.assumptions()
    }

    pub fn reserves(&self) -> &ReserveEngine {
        &self.reserves
    }

    pub fn config(&self) -> ValuationConfig {
        self.config
    }

    /// Reserve at every whole policy year from issue to maturity
    ///
    /// The net premium is solved once. The final row (t = term) is exactly 0.
    pub fn project_policy(&self, policy: &Policy) -> Result<ProjectionResult> {
        let net_premium = self.reserves.net_premium_at_issue(policy)?;
        let mut result = ProjectionResult::new(policy.policy_id, net_premium);

        for t in 0..=policy.term {
            let value = self
                .reserves
                .value_with_net_premium(policy, t as f64, net_premium)?;
            result.add_row(ProjectionRow::from_value(
                t,
                policy.attained_age(t),
                policy.remaining_term(t),
                &value,
            ));
        }

        debug!(
            "projected policy {} over {} years, P'={:.4}",
            policy.policy_id,
            policy.term,
            net_premium
        );
        Ok(result)
    }

    /// Reserve of every in-force policy at `valuation_date`
    ///
    /// Policies not in force are skipped. Any policy that fails to value
    /// fails the whole snapshot.
    pub fn portfolio_snapshot(
        &self,
        policies: &[Policy],
        valuation_date: NaiveDate,
    ) -> Result<PortfolioValuation> {
        let in_force: Vec<&Policy> = policies
            .iter()
            .filter(|p| {
                if !p.is_in_force() {
                    debug!("policy {} skipped: {}", p.policy_id, p.status.as_str());
                }
                p.is_in_force()
            })
            .collect();
        let skipped = policies.len() - in_force.len();

        let entries: Vec<PortfolioValuationEntry> = match (self.config.parallel, self.config.use_cache) {
            (true, false) => in_force
                .par_iter()
                .map(|p| self.value_entry(p, valuation_date))
                .collect::<Result<_>>()?,
            (true, true) => in_force
                .par_iter()
                .map_init(IssueFactorCache::new, |cache, p| {
                    self.value_entry_cached(cache, p, valuation_date)
                })
                .collect::<Result<_>>()?,
            (false, false) => in_force
                .iter()
                .map(|p| self.value_entry(p, valuation_date))
                .collect::<Result<_>>()?,
            (false, true) => {
                let mut cache = IssueFactorCache::new();
                let mut entries = Vec::with_capacity(in_force.len());
                for p in &in_force {
                    entries.push(self.value_entry_cached(&mut cache, p, valuation_date)?);
                }
                debug!(
                    "issue factor cache: {} cells, hit rate {:.1}%",
                    cache.len(),
                    cache.hit_rate() * 100.0
                );
                entries
            }
        };

        let valuation = PortfolioValuation::from_entries(valuation_date, entries, skipped);
        info!(
            "portfolio at {}: {} valued, {} skipped, total reserve {:.2}",
            valuation_date, valuation.policies_valued, valuation.policies_skipped, valuation.total_reserve
        );
        Ok(valuation)
    }

    fn value_entry(&self, policy: &Policy, valuation_date: NaiveDate) -> Result<PortfolioValuationEntry> {
        let elapsed_years = self.elapsed_years(policy, valuation_date);
        Ok(PortfolioValuationEntry {
            policy_id: policy.policy_id,
            elapsed_years,
            reserve: self.reserves.reserve_at(policy, elapsed_years as f64)?,
        })
    }

    fn value_entry_cached(
        &self,
        cache: &mut IssueFactorCache,
        policy: &Policy,
        valuation_date: NaiveDate,
    ) -> Result<PortfolioValuationEntry> {
        let elapsed_years = self.elapsed_years(policy, valuation_date);
        Ok(PortfolioValuationEntry {
            policy_id: policy.policy_id,
            elapsed_years,
            reserve: self
                .reserves
                .reserve_at_cached(cache, policy, elapsed_years as f64)?,
        })
    }

    fn elapsed_years(&self, policy: &Policy, valuation_date: NaiveDate) -> u32 {
        let elapsed_years = policy.elapsed_years(valuation_date);
        if elapsed_years >= policy.term {
            warn!(
                "policy {} still in force {} years into a {} year term",
                policy.policy_id, elapsed_years, policy.term
            );
        }
        elapsed_years
    }
}
