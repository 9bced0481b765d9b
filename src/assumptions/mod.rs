//! Actuarial assumptions: mortality law, interest basis, expense and risk loadings

mod mortality;
mod interest;
pub mod loader;

pub use mortality::{MakehamParams, MortalityModel};
pub use interest::InterestBasis;

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use crate::error::{require, Result, ValuationError};

/// Default number of Simpson subdivisions per integral
pub const DEFAULT_QUADRATURE_STEPS: usize = 100;

/// Expense loading structure applied to gross premiums only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLoadings {
    /// Expense per policy year, paid continuously and valued at the expense rate
    pub fixed_expense_rate: f64,

    /// One-off expense at issue
    pub fixed_expense_amount: f64,
}

impl Default for ExpenseLoadings {
    fn default() -> Self {
        Self {
            fixed_expense_rate: 25.0,
            fixed_expense_amount: 150.0,
        }
    }
}

/// Additive risk loadings on top of a base multiplier of 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLoadings {
    pub smoker: f64,
    pub minor_history: f64,
    pub major_history: f64,
}

impl Default for RiskLoadings {
    fn default() -> Self {
        Self {
            smoker: 1.5,
            minor_history: 0.5,
            major_history: 2.5,
        }
    }
}

/// Raw assumption values as they are configured, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionInputs {
    pub makeham: MakehamParams,

    /// Age beyond which cover is not offered (omega)
    pub limiting_age: f64,

    /// Annual rate for benefit and premium discounting (i)
    pub valuation_rate: f64,

    /// Annual rate for the expense-annuity factor (i_in)
    pub expense_rate: f64,

    /// Standard policy term in years (n)
    pub standard_term: u32,

    pub expenses: ExpenseLoadings,
    pub loadings: RiskLoadings,

    /// Simpson subdivisions per integral; even and at least 2
    pub quadrature_steps: usize,
}

impl Default for AssumptionInputs {
    fn default() -> Self {
        Self {
            makeham: MakehamParams::default(),
            limiting_age: 120.0,
            valuation_rate: 0.05,
            expense_rate: 0.03,
            standard_term: 15,
            expenses: ExpenseLoadings::default(),
            loadings: RiskLoadings::default(),
            quadrature_steps: DEFAULT_QUADRATURE_STEPS,
        }
    }
}

/// Validated, immutable assumption set
///
/// Derived quantities (forces of interest, Makeham transforms) are computed
/// once here. Engines own a copy, so several assumption sets (product
/// variants, sensitivities) can be used side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuarialAssumptions {
    inputs: AssumptionInputs,
    mortality: MortalityModel,
    interest: InterestBasis,
}

impl ActuarialAssumptions {
    /// Validate raw inputs and derive the cached quantities
    pub fn new(inputs: AssumptionInputs) -> Result<Self> {
        let mortality = MortalityModel::new(inputs.makeham)?;
        let interest = InterestBasis::new(inputs.valuation_rate, inputs.expense_rate)?;

        require!(
            inputs.limiting_age.is_finite() && inputs.limiting_age > 0.0,
            "limiting age must be > 0, got {}",
            inputs.limiting_age
        );
        require!(inputs.standard_term > 0, "standard term must be > 0");
        require!(
            inputs.quadrature_steps >= 2 && inputs.quadrature_steps % 2 == 0,
            "quadrature steps must be even and >= 2, got {}",
            inputs.quadrature_steps
        );

        let ExpenseLoadings { fixed_expense_rate, fixed_expense_amount } = inputs.expenses;
        require!(
            fixed_expense_rate.is_finite() && fixed_expense_rate >= 0.0,
            "fixed expense rate must be >= 0, got {fixed_expense_rate}"
        );
        require!(
            fixed_expense_amount.is_finite() && fixed_expense_amount >= 0.0,
            "fixed expense amount must be >= 0, got {fixed_expense_amount}"
        );

        let RiskLoadings { smoker, minor_history, major_history } = inputs.loadings;
        for (name, value) in [("smoker", smoker), ("minor history", minor_history), ("major history", major_history)] {
            require!(value.is_finite() && value >= 0.0, "{name} loading must be >= 0, got {value}");
        }

        Ok(Self { inputs, mortality, interest })
    }

    /// Default pricing basis for the term-assurance product
    pub fn default_pricing() -> Self {
        let inputs = AssumptionInputs::default();
        Self {
            mortality: MortalityModel::default(),
            interest: InterestBasis::default(),
            inputs,
        }
    }

    /// Load assumptions from the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Self::new(loader::load_assumption_inputs(path)?)
    }

    /// Load from `path`, or the default pricing basis when it has no basis file
    ///
    /// Only a missing file falls back. A file that exists but is malformed or
    /// out of domain is an error.
    pub fn from_csv_path_or_default(path: &Path) -> Result<Self> {
        match Self::from_csv_path(path) {
            Err(ValuationError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "no {} in {}; using default pricing basis",
                    loader::VALUATION_BASIS_FILE,
                    path.display()
                );
                Ok(Self::default_pricing())
            }
            other => other,
        }
    }

    /// Same basis with a different valuation interest rate
    pub fn with_valuation_rate(&self, rate: f64) -> Result<Self> {
        Self::new(AssumptionInputs {
            valuation_rate: rate,
            ..self.inputs.clone()
        })
    }

    /// Same basis with a different mortality law
    pub fn with_makeham(&self, makeham: MakehamParams) -> Result<Self> {
        Self::new(AssumptionInputs {
            makeham,
            ..self.inputs.clone()
        })
    }

    pub fn inputs(&self) -> &AssumptionInputs {
        &self.inputs
    }

    pub fn mortality(&self) -> &MortalityModel {
        &self.mortality
    }

    pub fn interest(&self) -> &InterestBasis {
        &self.interest
    }

    pub fn limiting_age(&self) -> f64 {
        self.inputs.limiting_age
    }

    pub fn standard_term(&self) -> u32 {
        self.inputs.standard_term
    }

    pub fn expenses(&self) -> &ExpenseLoadings {
        &self.inputs.expenses
    }

    pub fn loadings(&self) -> &RiskLoadings {
        &self.inputs.loadings
    }

    pub fn quadrature_steps(&self) -> usize {
        self.inputs.quadrature_steps
    }
}

impl Default for ActuarialAssumptions {
    fn default() -> Self {
        Self::default_pricing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_pricing_matches_validated_inputs() {
        let default = ActuarialAssumptions::default_pricing();
        let validated = ActuarialAssumptions::new(AssumptionInputs::default()).unwrap();
        assert_eq!(default, validated);

        assert_eq!(default.limiting_age(), 120.0);
        assert_eq!(default.standard_term(), 15);
        assert_eq!(default.quadrature_steps(), 100);
        assert_relative_eq!(default.interest().delta(), 1.05_f64.ln(), max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let bad_steps = AssumptionInputs { quadrature_steps: 99, ..Default::default() };
        assert!(ActuarialAssumptions::new(bad_steps).is_err());

        let bad_term = AssumptionInputs { standard_term: 0, ..Default::default() };
        assert!(ActuarialAssumptions::new(bad_term).is_err());

        let bad_omega = AssumptionInputs { limiting_age: 0.0, ..Default::default() };
        assert!(ActuarialAssumptions::new(bad_omega).is_err());

        let bad_rate = AssumptionInputs { valuation_rate: -1.0, ..Default::default() };
        assert!(ActuarialAssumptions::new(bad_rate).is_err());

        let bad_loading = AssumptionInputs {
            loadings: RiskLoadings { smoker: -0.5, ..Default::default() },
            ..Default::default()
        };
        assert!(ActuarialAssumptions::new(bad_loading).is_err());
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("term_valuation_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_basis_file_falls_back_to_default() {
        let dir = scratch_dir("missing_basis");
        let loaded = ActuarialAssumptions::from_csv_path_or_default(&dir).unwrap();
        assert_eq!(loaded, ActuarialAssumptions::default_pricing());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bad_basis_file_is_not_replaced_by_default() {
        let dir = scratch_dir("bad_basis");
        let file = dir.join(loader::VALUATION_BASIS_FILE);

        std::fs::write(&file, "Parameter,Value\nlapse_rate,0.9\n").unwrap();
        assert!(matches!(
            ActuarialAssumptions::from_csv_path_or_default(&dir),
            Err(ValuationError::InvalidRecord(_))
        ));

        std::fs::write(&file, "Parameter,Value\nquadrature_steps,7\n").unwrap();
        assert!(matches!(
            ActuarialAssumptions::from_csv_path_or_default(&dir),
            Err(ValuationError::InvalidArgument(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_variants_leave_base_untouched() {
        let base = ActuarialAssumptions::default_pricing();
        let variant = base.with_valuation_rate(0.03).unwrap();

        assert_eq!(base.interest().valuation_rate(), 0.05);
        assert_eq!(variant.interest().valuation_rate(), 0.03);
        assert_eq!(variant.mortality(), base.mortality());

        let no_mortality = base
            .with_makeham(MakehamParams { a: 0.0, b: 0.0, c: 1.124 })
            .unwrap();
        assert_eq!(no_mortality.mortality().force_of_mortality(50.0), 0.0);
        assert_eq!(no_mortality.interest(), base.interest());
    }
}
