//! Premium calculation under the equivalence principle
//!
//! Two explicit entry points:
//! - [`PremiumCalculator::net_premium`]: benefits only, no expenses or
//!   loadings. This is the premium reserves are held against.
//! - [`PremiumCalculator::gross_quote`]: expenses and risk loadings on top,
//!   for new-business pricing only.

use log::{debug, warn};

use super::types::{Applicant, HistoryCategory, Quote, RiskCategory};
use crate::assumptions::{ActuarialAssumptions, RiskLoadings};
use crate::error::{require, Result, ValuationError};
use crate::integration::FactorCalculator;

/// Smallest annuity factor a premium may be divided by
pub const MIN_ANNUITY_FACTOR: f64 = 1e-12;

/// Risk loading multiplier: 1.0 plus each applicable loading
///
/// The sum is literal and order-independent; with the default loadings a
/// smoker with major history gets 1.0 + 1.5 + 2.5 = 5.0.
pub fn loading_multiplier(loadings: &RiskLoadings, smoker: bool, history: HistoryCategory) -> f64 {
    let mut multiplier = 1.0;
    if smoker {
        multiplier += loadings.smoker;
    }
    match history {
        HistoryCategory::Clean => {}
        HistoryCategory::Minor => multiplier += loadings.minor_history,
        HistoryCategory::Major => multiplier += loadings.major_history,
    }
    multiplier
}

/// Validate the inputs common to every premium and reserve calculation
pub(crate) fn validate_inputs(age: f64, coverage: f64, term: f64) -> Result<()> {
    require!(age.is_finite() && age >= 0.0, "age must be >= 0, got {age}");
    require!(coverage.is_finite() && coverage > 0.0, "coverage must be > 0, got {coverage}");
    require!(term.is_finite() && term > 0.0, "term must be > 0, got {term}");
    Ok(())
}

/// Fail unless the annuity factor can safely be divided by
pub(crate) fn check_annuity(annuity: f64, age: f64, term: f64) -> Result<()> {
    if annuity.is_nan() || annuity <= MIN_ANNUITY_FACTOR {
        return Err(ValuationError::UndefinedQuantity(format!(
            "annuity factor {annuity:e} is negligible for age {age}, term {term}"
        )));
    }
    Ok(())
}

/// Net premium from precomputed issue factors
///
/// Shared by the direct and cached paths so both evaluate the same expression.
pub(crate) fn net_premium_from_factors(coverage: f64, assurance: f64, annuity: f64) -> f64 {
    coverage * assurance / annuity
}

/// Premium calculator for the term-assurance product
#[derive(Debug, Clone)]
pub struct PremiumCalculator {
    assumptions: ActuarialAssumptions,
}

impl PremiumCalculator {
    pub fn new(assumptions: ActuarialAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &ActuarialAssumptions {
        &self.assumptions
    }

    pub(crate) fn factor_calculator(&self) -> Result<FactorCalculator<'_>> {
        FactorCalculator::new(&self.assumptions)
    }

    /// Annual net premium `coverage · Ā / ā` at the valuation rate
    pub fn net_premium(&self, age: f64, coverage: f64, term: f64) -> Result<f64> {
        validate_inputs(age, coverage, term)?;

        let calc = self.factor_calculator()?;
        let assurance = calc.assurance_factor(age, term)?;
        let annuity = calc.annuity_factor(age, term)?;
        check_annuity(annuity, age, term)?;

        let premium = net_premium_from_factors(coverage, assurance, annuity);
        debug!(
            "net premium age={} term={} coverage={:.2}: A={:.8} a={:.8} P={:.4}",
            age, term, coverage, assurance, annuity, premium
        );
        Ok(premium)
    }

    /// Loading multiplier under this calculator's risk loadings
    pub fn loading_multiplier(&self, smoker: bool, history: HistoryCategory) -> f64 {
        loading_multiplier(self.assumptions.loadings(), smoker, history)
    }

    /// Whether cover for `term` years from `age` ends before the limiting age
    pub fn is_insurable(&self, age: f64, term: f64) -> bool {
        age + term < self.assumptions.limiting_age()
    }

    /// Gross premium quote with expenses and risk loadings
    pub fn gross_quote(
        &self,
        age: f64,
        coverage: f64,
        term: f64,
        smoker: bool,
        history: HistoryCategory,
    ) -> Result<Quote> {
        validate_inputs(age, coverage, term)?;

        let factors = self.factor_calculator()?.factors(age, term)?;
        check_annuity(factors.annuity, age, term)?;

        let expenses = self.assumptions.expenses();
        let base_annual_premium = (coverage * factors.assurance
            + factors.annuity_in * expenses.fixed_expense_rate
            + expenses.fixed_expense_amount)
            / factors.annuity;

        let multiplier = self.loading_multiplier(smoker, history);
        let annual_premium = base_annual_premium * multiplier;
        let approved = self.is_insurable(age, term);

        debug!(
            "gross quote age={} term={} coverage={:.2}: A={:.8} a={:.8} a_in={:.8} base={:.4} x{}",
            age, term, coverage, factors.assurance, factors.annuity, factors.annuity_in,
            base_annual_premium, multiplier
        );
        if !approved {
            warn!(
                "declined: age {} + term {} reaches limiting age {}",
                age,
                term,
                self.assumptions.limiting_age()
            );
        }

        Ok(Quote {
            age,
            term,
            coverage,
            assurance_factor: factors.assurance,
            annuity_factor: factors.annuity,
            annuity_in_factor: factors.annuity_in,
            base_annual_premium,
            loading_multiplier: multiplier,
            annual_premium,
            monthly_premium: annual_premium / 12.0,
            risk_category: RiskCategory::classify(smoker, history),
            approved,
        })
    }

    /// Quote a new-business applicant at the standard term
    pub fn quote_standard(&self, applicant: &Applicant) -> Result<Quote> {
        self.gross_quote(
            applicant.age,
            applicant.coverage,
            self.assumptions.standard_term() as f64,
            applicant.smoker,
            applicant.history,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{AssumptionInputs, ExpenseLoadings, MakehamParams};
    use approx::assert_relative_eq;

    fn calculator() -> PremiumCalculator {
        PremiumCalculator::new(ActuarialAssumptions::default_pricing())
    }

    #[test]
    fn test_loading_multiplier_exact() {
        let loadings = RiskLoadings::default();

        assert_eq!(loading_multiplier(&loadings, false, HistoryCategory::Clean), 1.0);
        assert_eq!(loading_multiplier(&loadings, true, HistoryCategory::Clean), 2.5);
        assert_eq!(loading_multiplier(&loadings, false, HistoryCategory::Minor), 1.5);
        assert_eq!(loading_multiplier(&loadings, false, HistoryCategory::Major), 3.5);
        assert_eq!(loading_multiplier(&loadings, true, HistoryCategory::Minor), 3.0);
        assert_eq!(loading_multiplier(&loadings, true, HistoryCategory::Major), 5.0);
    }

    #[test]
    fn test_gross_premium_scales_with_multiplier() {
        let calc = calculator();
        let clean = calc.gross_quote(45.0, 100_000.0, 15.0, false, HistoryCategory::Clean).unwrap();
        let loaded = calc.gross_quote(45.0, 100_000.0, 15.0, true, HistoryCategory::Major).unwrap();

        assert_eq!(clean.base_annual_premium, loaded.base_annual_premium);
        assert_eq!(loaded.loading_multiplier, 5.0);
        assert_relative_eq!(loaded.annual_premium, clean.annual_premium * 5.0, max_relative = 1e-15);
        assert_eq!(loaded.risk_category, RiskCategory::High);
        assert_eq!(clean.risk_category, RiskCategory::Low);
    }

    #[test]
    fn test_gross_quote_formula() {
        let calc = calculator();
        let quote = calc.gross_quote(45.0, 250_000.0, 15.0, true, HistoryCategory::Clean).unwrap();

        let expected_base = (250_000.0 * quote.assurance_factor
            + quote.annuity_in_factor * 25.0
            + 150.0)
            / quote.annuity_factor;
        assert_relative_eq!(quote.base_annual_premium, expected_base, max_relative = 1e-14);
        assert_relative_eq!(quote.annual_premium, expected_base * 2.5, max_relative = 1e-14);
        assert_relative_eq!(quote.monthly_premium, quote.annual_premium / 12.0);
        assert_eq!(quote.risk_category, RiskCategory::Medium);
    }

    #[test]
    fn test_approval_boundary() {
        let calc = calculator();

        let insurable = calc.gross_quote(45.0, 100_000.0, 15.0, false, HistoryCategory::Clean).unwrap();
        assert!(insurable.approved);

        // Declined quotes are still fully populated
        let declined = calc.gross_quote(110.0, 100_000.0, 15.0, false, HistoryCategory::Clean).unwrap();
        assert!(!declined.approved);
        assert!(declined.annual_premium > 0.0);
        assert!(declined.annual_premium.is_finite());
        assert!(declined.annual_premium > insurable.annual_premium);

        // Exactly reaching omega is declined
        let boundary = calc.gross_quote(105.0, 100_000.0, 15.0, false, HistoryCategory::Clean).unwrap();
        assert!(!boundary.approved);
    }

    #[test]
    fn test_net_premium_excludes_expenses_and_loadings() {
        let calc = calculator();
        let net = calc.net_premium(45.0, 100_000.0, 15.0).unwrap();
        let quote = calc.gross_quote(45.0, 100_000.0, 15.0, false, HistoryCategory::Clean).unwrap();

        assert_relative_eq!(
            net,
            100_000.0 * quote.assurance_factor / quote.annuity_factor,
            max_relative = 1e-14
        );
        assert!(net < quote.annual_premium);

        // With no expenses the clean gross premium collapses to the net premium
        let no_expenses = PremiumCalculator::new(
            ActuarialAssumptions::new(AssumptionInputs {
                expenses: ExpenseLoadings { fixed_expense_rate: 0.0, fixed_expense_amount: 0.0 },
                ..Default::default()
            })
            .unwrap(),
        );
        let bare = no_expenses
            .gross_quote(45.0, 100_000.0, 15.0, false, HistoryCategory::Clean)
            .unwrap();
        assert_relative_eq!(bare.annual_premium, net, max_relative = 1e-14);
    }

    #[test]
    fn test_zero_mortality_premium() {
        let calc = PremiumCalculator::new(
            ActuarialAssumptions::new(AssumptionInputs {
                makeham: MakehamParams { a: 0.0, b: 0.0, c: 1.124 },
                ..Default::default()
            })
            .unwrap(),
        );

        assert_eq!(calc.net_premium(45.0, 100_000.0, 15.0).unwrap(), 0.0);

        let quote = calc.gross_quote(45.0, 100_000.0, 15.0, false, HistoryCategory::Clean).unwrap();
        assert_eq!(quote.assurance_factor, 0.0);
        assert!((quote.annuity_factor - 10.64).abs() < 1e-2);
    }

    #[test]
    fn test_invalid_inputs() {
        let calc = calculator();

        for (age, coverage, term) in [
            (-1.0, 100_000.0, 15.0),
            (45.0, 0.0, 15.0),
            (45.0, -5.0, 15.0),
            (45.0, 100_000.0, 0.0),
            (45.0, 100_000.0, -2.0),
            (f64::NAN, 100_000.0, 15.0),
        ] {
            let err = calc.net_premium(age, coverage, term).unwrap_err();
            assert!(matches!(err, ValuationError::InvalidArgument(_)));
            assert!(calc
                .gross_quote(age, coverage, term, false, HistoryCategory::Clean)
                .is_err());
        }
    }

    #[test]
    fn test_negligible_annuity_is_undefined() {
        let calc = calculator();

        // Survival has underflowed: the annuity factor is exactly zero
        let err = calc.net_premium(2_000.0, 100_000.0, 10.0).unwrap_err();
        assert!(matches!(err, ValuationError::UndefinedQuantity(_)));

        // A vanishing term leaves nothing to annuitise over
        let err = calc.net_premium(45.0, 100_000.0, 1e-14).unwrap_err();
        assert!(matches!(err, ValuationError::UndefinedQuantity(_)));
    }

    #[test]
    fn test_quote_standard_uses_standard_term() {
        let calc = calculator();
        let applicant = Applicant {
            age: 45.0,
            coverage: 100_000.0,
            smoker: false,
            history: HistoryCategory::Minor,
        };

        let standard = calc.quote_standard(&applicant).unwrap();
        let explicit = calc.gross_quote(45.0, 100_000.0, 15.0, false, HistoryCategory::Minor).unwrap();
        assert_eq!(standard, explicit);
        assert_eq!(standard.term, 15.0);
    }

    #[test]
    fn test_quote_deterministic() {
        let calc = calculator();
        let first = calc.gross_quote(52.0, 300_000.0, 15.0, true, HistoryCategory::Minor).unwrap();
        let second = calc.gross_quote(52.0, 300_000.0, 15.0, true, HistoryCategory::Minor).unwrap();

        assert_eq!(first, second);
        assert_eq!(calc.assumptions(), &ActuarialAssumptions::default_pricing());
    }
}
