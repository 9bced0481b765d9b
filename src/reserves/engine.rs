//! Prospective reserve (expected future loss) for a term-assurance policy
//!
//! The net premium P' is solved once from the issue age and term and held
//! fixed for the life of the policy. At elapsed duration `t` the reserve is
//!
//! ```text
//! V(t) = S · Ā(x0 + t, n0 − t) − P' · ā(x0 + t, n0 − t)
//! ```
//!
//! which is zero at issue by construction of P' and zero once the term has
//! run out.

use log::debug;

use super::cache::IssueFactorCache;
use super::types::{IssueFactors, ReserveValue};
use crate::assumptions::ActuarialAssumptions;
use crate::error::{require, Result};
use crate::policy::Policy;
use crate::pricing::premium::{check_annuity, net_premium_from_factors};
use crate::pricing::PremiumCalculator;

/// Reserve engine built on the net-premium side of the premium calculator
#[derive(Debug, Clone)]
pub struct ReserveEngine {
    pricing: PremiumCalculator,
}

impl ReserveEngine {
    pub fn new(assumptions: ActuarialAssumptions) -> Self {
        Self {
            pricing: PremiumCalculator::new(assumptions),
        }
    }

    pub fn assumptions(&self) -> &ActuarialAssumptions {
        self.pricing.assumptions()
    }

    /// Net annual premium fixed at issue
    pub fn net_premium_at_issue(&self, policy: &Policy) -> Result<f64> {
        policy.validate()?;
        self.pricing
            .net_premium(policy.issue_age as f64, policy.sum_insured, policy.term as f64)
    }

    /// Net premium at issue using and filling `cache`
    ///
    /// Bit-identical to [`ReserveEngine::net_premium_at_issue`].
    pub fn net_premium_at_issue_cached(
        &self,
        cache: &mut IssueFactorCache,
        policy: &Policy,
    ) -> Result<f64> {
        policy.validate()?;
        cache.bind(self.assumptions());

        let cell = (policy.issue_age, policy.term);
        let factors = match cache.lookup(cell) {
            Some(factors) => factors,
            None => {
                let calc = self.pricing.factor_calculator()?;
                let (age, term) = (policy.issue_age as f64, policy.term as f64);
                let factors = IssueFactors {
                    assurance: calc.assurance_factor(age, term)?,
                    annuity: calc.annuity_factor(age, term)?,
                };
                cache.insert(cell, factors);
                factors
            }
        };

        check_annuity(factors.annuity, policy.issue_age as f64, policy.term as f64)?;
        Ok(net_premium_from_factors(policy.sum_insured, factors.assurance, factors.annuity))
    }

    /// Reserve at `elapsed_years` after inception
    ///
    /// Negative durations are treated as issue. Matured policies value to 0
    /// without evaluating the net premium.
    pub fn reserve_at(&self, policy: &Policy, elapsed_years: f64) -> Result<f64> {
        Ok(self.value_at(policy, elapsed_years)?.reserve)
    }

    /// Reserve with the factors behind it
    pub fn value_at(&self, policy: &Policy, elapsed_years: f64) -> Result<ReserveValue> {
        policy.validate()?;
        let t = clamp_duration(policy, elapsed_years)?;
        if is_matured(policy, t) {
            return Ok(ReserveValue::matured(t, policy.issue_age as f64 + t));
        }

        let net_premium = self.net_premium_at_issue(policy)?;
        self.value_with_net_premium(policy, t, net_premium)
    }

    /// Reserve using the issue-factor cache for the net premium
    pub fn reserve_at_cached(
        &self,
        cache: &mut IssueFactorCache,
        policy: &Policy,
        elapsed_years: f64,
    ) -> Result<f64> {
        policy.validate()?;
        let t = clamp_duration(policy, elapsed_years)?;
        if is_matured(policy, t) {
            return Ok(0.0);
        }

        let net_premium = self.net_premium_at_issue_cached(cache, policy)?;
        Ok(self.value_with_net_premium(policy, t, net_premium)?.reserve)
    }

    /// Prospective value at duration `t` against an already-solved net premium
    pub(crate) fn value_with_net_premium(
        &self,
        policy: &Policy,
        elapsed_years: f64,
        net_premium: f64,
    ) -> Result<ReserveValue> {
        let t = clamp_duration(policy, elapsed_years)?;
        let attained_age = policy.issue_age as f64 + t;
        let remaining_term = policy.term as f64 - t;
        if remaining_term <= 0.0 {
            return Ok(ReserveValue::matured(t, attained_age));
        }

        let calc = self.pricing.factor_calculator()?;
        let assurance_factor = calc.assurance_factor(attained_age, remaining_term)?;
        let annuity_factor = calc.annuity_factor(attained_age, remaining_term)?;
        let reserve = policy.sum_insured * assurance_factor - net_premium * annuity_factor;

        debug!(
            "policy {} t={} x={} n={}: A={:.8} a={:.8} V={:.4}",
            policy.policy_id, t, attained_age, remaining_term, assurance_factor, annuity_factor, reserve
        );

        Ok(ReserveValue {
            elapsed_years: t,
            attained_age,
            remaining_term,
            assurance_factor,
            annuity_factor,
            reserve,
        })
    }
}

fn clamp_duration(policy: &Policy, elapsed_years: f64) -> Result<f64> {
    require!(
        !elapsed_years.is_nan(),
        "policy {}: elapsed duration must be a number",
        policy.policy_id
    );
    Ok(elapsed_years.max(0.0))
}

fn is_matured(policy: &Policy, t: f64) -> bool {
    policy.term as f64 - t <= 0.0
}
