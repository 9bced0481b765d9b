//! Interest basis for continuous discounting
//!
//! Supports:
//! - A base valuation rate, used to discount benefits and premiums
//! - A separate expense rate, used only for the expense-annuity factor

use crate::error::{require, Result};

/// Effective annual rates and their cached forces of interest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestBasis {
    /// Base annual effective rate `i`
    valuation_rate: f64,

    /// Expense annual effective rate `i_in`
    expense_rate: f64,

    /// ln(1 + i)
    delta: f64,

    /// ln(1 + i_in)
    delta_in: f64,
}

impl InterestBasis {
    pub fn new(valuation_rate: f64, expense_rate: f64) -> Result<Self> {
        require!(
            valuation_rate.is_finite() && valuation_rate > -1.0,
            "valuation interest rate must be > -1, got {valuation_rate}"
        );
        require!(
            expense_rate.is_finite() && expense_rate > -1.0,
            "expense interest rate must be > -1, got {expense_rate}"
        );

        Ok(Self {
            valuation_rate,
            expense_rate,
            delta: (1.0 + valuation_rate).ln(),
            delta_in: (1.0 + expense_rate).ln(),
        })
    }

    /// Single-rate basis: expenses discounted at the valuation rate
    pub fn single_rate(annual_rate: f64) -> Result<Self> {
        Self::new(annual_rate, annual_rate)
    }

    pub fn valuation_rate(&self) -> f64 {
        self.valuation_rate
    }

    pub fn expense_rate(&self) -> f64 {
        self.expense_rate
    }

    /// Force of interest on the valuation rate
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Force of interest on the expense rate
    pub fn delta_in(&self) -> f64 {
        self.delta_in
    }

    /// Continuous discount factor `e^(-delta t)`
    pub fn discount(&self, t: f64) -> f64 {
        (-self.delta * t).exp()
    }
}

impl Default for InterestBasis {
    fn default() -> Self {
        Self {
            valuation_rate: 0.05,
            expense_rate: 0.03,
            delta: (1.0_f64 + 0.05).ln(),
            delta_in: (1.0_f64 + 0.03).ln(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forces_of_interest() {
        let basis = InterestBasis::new(0.05, 0.03).unwrap();
        assert_relative_eq!(basis.delta(), 1.05_f64.ln(), max_relative = 1e-12);
        assert_relative_eq!(basis.delta_in(), 1.03_f64.ln(), max_relative = 1e-12);
        assert_eq!(basis, InterestBasis::default());
    }

    #[test]
    fn test_discount_factor() {
        let basis = InterestBasis::single_rate(0.06).unwrap();

        // e^(-delta t) equals v^t for integer t
        assert_relative_eq!(basis.discount(12.0), 1.06_f64.powi(-12), max_relative = 1e-12);
        assert_eq!(basis.discount(0.0), 1.0);
    }

    #[test]
    fn test_negative_rates_allowed_above_minus_one() {
        let basis = InterestBasis::new(-0.01, 0.0).unwrap();
        assert!(basis.delta() < 0.0);
        assert_eq!(basis.delta_in(), 0.0);

        assert!(InterestBasis::new(-1.0, 0.03).is_err());
        assert!(InterestBasis::new(0.05, -1.5).is_err());
        assert!(InterestBasis::new(f64::INFINITY, 0.03).is_err());
    }
}
