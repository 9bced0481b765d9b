//! CSV-based assumption loader
//!
//! Loads the valuation basis from `valuation_basis.csv` in data/assumptions/.
//! The file holds `Parameter,Value` rows; any parameter left out keeps its
//! default pricing value.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::AssumptionInputs;
use crate::error::{Result, ValuationError};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name of the valuation basis inside the assumptions directory
pub const VALUATION_BASIS_FILE: &str = "valuation_basis.csv";

/// Load assumption inputs from `valuation_basis.csv` in the given directory
pub fn load_assumption_inputs(path: &Path) -> Result<AssumptionInputs> {
    let file = File::open(path.join(VALUATION_BASIS_FILE))?;
    load_assumption_inputs_from_reader(file)
}

/// Load assumption inputs from any reader
pub fn load_assumption_inputs_from_reader<R: Read>(reader: R) -> Result<AssumptionInputs> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut inputs = AssumptionInputs::default();

    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default();
        let raw = record.get(1).unwrap_or_default();

        match name {
            "makeham_a" => inputs.makeham.a = parse_value(name, raw)?,
            "makeham_b" => inputs.makeham.b = parse_value(name, raw)?,
            "makeham_c" => inputs.makeham.c = parse_value(name, raw)?,
            "limiting_age" => inputs.limiting_age = parse_value(name, raw)?,
            "valuation_rate" => inputs.valuation_rate = parse_value(name, raw)?,
            "expense_rate" => inputs.expense_rate = parse_value(name, raw)?,
            "standard_term" => inputs.standard_term = parse_value(name, raw)?,
            "fixed_expense_rate" => inputs.expenses.fixed_expense_rate = parse_value(name, raw)?,
            "fixed_expense_amount" => inputs.expenses.fixed_expense_amount = parse_value(name, raw)?,
            "smoker_loading" => inputs.loadings.smoker = parse_value(name, raw)?,
            "minor_history_loading" => inputs.loadings.minor_history = parse_value(name, raw)?,
            "major_history_loading" => inputs.loadings.major_history = parse_value(name, raw)?,
            "quadrature_steps" => inputs.quadrature_steps = parse_value(name, raw)?,
            other => {
                return Err(ValuationError::InvalidRecord(format!(
                    "unknown assumption parameter: {}",
                    other
                )))
            }
        }
    }

    Ok(inputs)
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        ValuationError::InvalidRecord(format!("cannot parse value '{}' for {}", raw, name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::ActuarialAssumptions;

    #[test]
    fn test_load_default_assumptions() {
        let result = ActuarialAssumptions::from_csv();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        // The shipped file restates the default pricing basis
        assert_eq!(result.unwrap(), ActuarialAssumptions::default_pricing());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let data = "Parameter,Value\nvaluation_rate,0.04\nstandard_term,20\n";
        let inputs = load_assumption_inputs_from_reader(data.as_bytes()).unwrap();

        assert_eq!(inputs.valuation_rate, 0.04);
        assert_eq!(inputs.standard_term, 20);
        assert_eq!(inputs.makeham, AssumptionInputs::default().makeham);
        assert_eq!(inputs.quadrature_steps, 100);
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let data = "Parameter,Value\nlapse_rate,0.05\n";
        let err = load_assumption_inputs_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidRecord(_)));
    }

    #[test]
    fn test_unparseable_value_rejected() {
        let data = "Parameter,Value\nquadrature_steps,one hundred\n";
        let err = load_assumption_inputs_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("quadrature_steps"));
    }

    #[test]
    fn test_loaded_values_are_validated() {
        let data = "Parameter,Value\nquadrature_steps,7\n";
        let inputs = load_assumption_inputs_from_reader(data.as_bytes()).unwrap();
        assert!(ActuarialAssumptions::new(inputs).is_err());
    }
}
