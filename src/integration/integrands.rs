//! Discounted cashflow integrands and the factors built from them
//!
//! - Assurance: `e^(-δt) · tpx(x, t) · mu(x + t)`, the discounted density of
//!   death at duration `t`
//! - Annuity: `e^(-δ't) · tpx(x, t)`, a survival-weighted unit income stream
//!   discounted at either the valuation force δ or the expense force δ_in
//!
//! Integrating each over the remaining term gives the assurance factor (EPV of
//! a unit death benefit) and the annuity factors (EPV of a unit continuous
//! income while alive).

use serde::{Deserialize, Serialize};

use super::simpson::SimpsonIntegrator;
use crate::assumptions::ActuarialAssumptions;
use crate::error::Result;

/// Integrand functions closing over the mortality law and interest basis
#[derive(Debug, Clone, Copy)]
pub struct CashflowIntegrands<'a> {
    assumptions: &'a ActuarialAssumptions,
}

impl<'a> CashflowIntegrands<'a> {
    pub fn new(assumptions: &'a ActuarialAssumptions) -> Self {
        Self { assumptions }
    }

    /// Discounted density of death at exact duration `t` for a life aged `x`
    ///
    /// Zero once survival has underflowed, where the force of mortality may
    /// already be infinite.
    pub fn assurance(&self, t: f64, x: f64) -> f64 {
        let mortality = self.assumptions.mortality();
        let survival = mortality.tpx(x, t);
        if survival == 0.0 {
            return 0.0;
        }
        self.assumptions.interest().discount(t) * survival * mortality.force_of_mortality(x + t)
    }

    /// Discounted survival-weighted unit income at duration `t` under force `delta`
    pub fn annuity(&self, t: f64, x: f64, delta: f64) -> f64 {
        (-delta * t).exp() * self.assumptions.mortality().tpx(x, t)
    }
}

/// The three factors an underwriting or valuation calculation needs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CashflowFactors {
    /// EPV of a unit death benefit over the term
    pub assurance: f64,

    /// EPV of a unit continuous annuity at the valuation rate
    pub annuity: f64,

    /// EPV of a unit continuous annuity at the expense rate
    pub annuity_in: f64,
}

/// Feeds the integrands to the Simpson integrator for a given age and term
#[derive(Debug, Clone, Copy)]
pub struct FactorCalculator<'a> {
    integrands: CashflowIntegrands<'a>,
    integrator: SimpsonIntegrator,
}

impl<'a> FactorCalculator<'a> {
    pub fn new(assumptions: &'a ActuarialAssumptions) -> Result<Self> {
        Ok(Self {
            integrands: CashflowIntegrands::new(assumptions),
            integrator: SimpsonIntegrator::new(assumptions.quadrature_steps())?,
        })
    }

    /// Term assurance factor for a life aged `age` over `term` years
    pub fn assurance_factor(&self, age: f64, term: f64) -> Result<f64> {
        let integrands = self.integrands;
        self.integrator
            .integrate(|t, x| integrands.assurance(t, x), age, term)
    }

    /// Temporary annuity factor at the valuation force of interest
    pub fn annuity_factor(&self, age: f64, term: f64) -> Result<f64> {
        let delta = self.integrands.assumptions.interest().delta();
        self.annuity_factor_at(age, term, delta)
    }

    /// Temporary annuity factor at the expense force of interest
    pub fn annuity_in_factor(&self, age: f64, term: f64) -> Result<f64> {
        let delta_in = self.integrands.assumptions.interest().delta_in();
        self.annuity_factor_at(age, term, delta_in)
    }

    fn annuity_factor_at(&self, age: f64, term: f64, delta: f64) -> Result<f64> {
        let integrands = self.integrands;
        self.integrator
            .integrate(|t, x| integrands.annuity(t, x, delta), age, term)
    }

    /// All three factors for one age and term
    pub fn factors(&self, age: f64, term: f64) -> Result<CashflowFactors> {
        Ok(CashflowFactors {
            assurance: self.assurance_factor(age, term)?,
            annuity: self.annuity_factor(age, term)?,
            annuity_in: self.annuity_in_factor(age, term)?,
        })
    }

    /// Complete expectation of life for a life aged `age`, truncated at `horizon` years
    pub fn expected_lifetime(&self, age: f64, horizon: f64) -> Result<f64> {
        let mortality = self.integrands.assumptions.mortality();
        self.integrator
            .integrate(|t, x| mortality.tpx(x, t), age, horizon)
    }
}
