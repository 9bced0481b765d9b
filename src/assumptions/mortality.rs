//! Gompertz-Makeham mortality law
//!
//! The law is parameterised by `A` (age-independent hazard), `B` and `c`
//! (the Gompertz senescence term). The survival index is unnormalised:
//!
//! ```text
//! S(x) = s^x * g^(c^x),   s = e^-A,   g = e^(-B / ln c)
//! ```
//!
//! Only ratios of `S` are meaningful, so everything the engine consumes goes
//! through [`MortalityModel::tpx`].

use serde::{Deserialize, Serialize};

use crate::error::{require, Result};

/// Raw Makeham parameters as they appear in an assumption file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MakehamParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for MakehamParams {
    /// Standard select-free basis used for the default pricing assumptions
    fn default() -> Self {
        Self {
            a: 0.00022,
            b: 2.7e-6,
            c: 1.124,
        }
    }
}

/// Mortality model with the Makeham transforms cached at construction
#[derive(Debug, Clone, PartialEq)]
pub struct MortalityModel {
    params: MakehamParams,

    /// e^-A
    s: f64,

    /// e^(-B / ln c)
    g: f64,
}

impl MortalityModel {
    /// Validate the parameters and cache `s` and `g`
    pub fn new(params: MakehamParams) -> Result<Self> {
        let MakehamParams { a, b, c } = params;
        require!(a.is_finite() && a >= 0.0, "Makeham A must be >= 0, got {a}");
        require!(b.is_finite() && b >= 0.0, "Makeham B must be >= 0, got {b}");
        require!(c.is_finite() && c > 1.0, "Makeham c must be > 1, got {c}");

        Ok(Self {
            params,
            s: (-a).exp(),
            g: (-b / c.ln()).exp(),
        })
    }

    pub fn params(&self) -> MakehamParams {
        self.params
    }

    /// Survival index `S(x)`, strictly decreasing in `x`
    pub fn survival(&self, x: f64) -> f64 {
        self.s.powf(x) * self.g.powf(self.params.c.powf(x))
    }

    /// Probability that a life aged `x` survives a further `t` years
    ///
    /// Returns 0 when `S(x)` has underflowed, so very old ages never produce
    /// NaN or infinity.
    pub fn tpx(&self, x: f64, t: f64) -> f64 {
        let s_x = self.survival(x);
        if s_x == 0.0 {
            return 0.0;
        }
        (self.survival(x + t) / s_x).clamp(0.0, 1.0)
    }

    /// Probability that a life aged `x` dies within `t` years
    pub fn tqx(&self, x: f64, t: f64) -> f64 {
        1.0 - self.tpx(x, t)
    }

    /// Force of mortality `mu(x) = A + B c^x`
    pub fn force_of_mortality(&self, x: f64) -> f64 {
        self.params.a + self.params.b * self.params.c.powf(x)
    }
}

impl Default for MortalityModel {
    fn default() -> Self {
        let params = MakehamParams::default();
        Self {
            params,
            s: (-params.a).exp(),
            g: (-params.b / params.c.ln()).exp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_model() -> MortalityModel {
        MortalityModel::new(MakehamParams::default()).unwrap()
    }

    #[test]
    fn test_default_matches_validated() {
        assert_eq!(MortalityModel::default(), default_model());
    }

    #[test]
    fn test_rejects_out_of_domain_parameters() {
        assert!(MortalityModel::new(MakehamParams { a: -0.001, ..Default::default() }).is_err());
        assert!(MortalityModel::new(MakehamParams { b: -1e-6, ..Default::default() }).is_err());
        assert!(MortalityModel::new(MakehamParams { c: 1.0, ..Default::default() }).is_err());
        assert!(MortalityModel::new(MakehamParams { c: f64::NAN, ..Default::default() }).is_err());
    }

    #[test]
    fn test_survival_strictly_decreasing() {
        let model = default_model();
        let mut prev = model.survival(0.0);
        for age in 1..=110 {
            let current = model.survival(age as f64);
            assert!(current < prev, "S({}) = {} not below S({}) = {}", age, current, age - 1, prev);
            prev = current;
        }
    }

    #[test]
    fn test_tpx_sanity() {
        let model = default_model();

        for age in [0.0, 25.0, 45.0, 80.0, 110.0] {
            assert_eq!(model.tpx(age, 0.0), 1.0);

            let mut prev = 1.0;
            for step in 1..=40 {
                let p = model.tpx(age, step as f64 * 0.5);
                assert!((0.0..=1.0).contains(&p));
                assert!(p <= prev);
                prev = p;
            }
        }
    }

    #[test]
    fn test_tpx_matches_closed_form() {
        let model = default_model();
        let MakehamParams { a, b, c } = model.params();

        // tpx = exp(-A t - B/ln c * c^x * (c^t - 1))
        let (x, t) = (45.0, 15.0);
        let expected = (-a * t - b / c.ln() * c.powf(x) * (c.powf(t) - 1.0)).exp();
        assert_relative_eq!(model.tpx(x, t), expected, max_relative = 1e-10);
        assert_relative_eq!(model.tqx(x, t), 1.0 - expected, max_relative = 1e-8);
    }

    #[test]
    fn test_tpx_underflow_is_zero() {
        let model = default_model();

        // c^x overflows the exponent long before this age, so S(x) == 0
        let age = 2_000.0;
        assert_eq!(model.survival(age), 0.0);
        assert_eq!(model.tpx(age, 1.0), 0.0);
        assert!(!model.tpx(age, 0.0).is_nan());
    }

    #[test]
    fn test_force_of_mortality() {
        let model = default_model();

        assert_relative_eq!(model.force_of_mortality(0.0), 0.00022 + 2.7e-6);
        assert_relative_eq!(
            model.force_of_mortality(60.0),
            0.00022 + 2.7e-6 * 1.124_f64.powf(60.0)
        );

        let mut prev = model.force_of_mortality(0.0);
        for age in 1..=120 {
            let mu = model.force_of_mortality(age as f64);
            assert!(mu > prev);
            assert!(mu >= 0.00022);
            prev = mu;
        }
    }

    #[test]
    fn test_zero_mortality_law() {
        let model = MortalityModel::new(MakehamParams { a: 0.0, b: 0.0, c: 1.124 }).unwrap();

        assert_eq!(model.survival(70.0), 1.0);
        assert_eq!(model.tpx(70.0, 30.0), 1.0);
        assert_eq!(model.force_of_mortality(70.0), 0.0);
    }
}
