//! Fixed-step composite Simpson quadrature
//!
//! Approximates `∫₀^U f(t, x) dt` on a uniform grid of `N` subdivisions with
//! weights 1, 4, 2, 4, ..., 2, 4, 1 and step `h = U / N`:
//!
//! ```text
//! h/3 * [f(0) + 4 f(h) + 2 f(2h) + ... + 4 f((N-1)h) + f(U)]
//! ```
//!
//! The weighting is only valid for an even `N >= 2`. An odd or too-small
//! count is rejected with `InvalidArgument`; it is never rounded.
//!
//! The rule is exact for polynomials in `t` of degree three or less.

use crate::error::{require, Result};

/// Integrate `f(t, x)` over `t` in `[0, upper_bound]`
///
/// `upper_bound <= 0` means there is nothing left to integrate (a matured or
/// expired policy) and returns 0 for any subdivision count.
pub fn integrate<F>(f: F, x: f64, upper_bound: f64, subdivisions: usize) -> Result<f64>
where
    F: Fn(f64, f64) -> f64,
{
    require!(!upper_bound.is_nan(), "upper bound must be a number");
    if upper_bound <= 0.0 {
        return Ok(0.0);
    }
    require!(upper_bound.is_finite(), "upper bound must be finite");
    validate_subdivisions(subdivisions)?;

    Ok(simpson_sum(&f, x, upper_bound, subdivisions))
}

fn validate_subdivisions(subdivisions: usize) -> Result<()> {
    require!(
        subdivisions >= 2 && subdivisions % 2 == 0,
        "Simpson subdivisions must be even and >= 2, got {}",
        subdivisions
    );
    Ok(())
}

fn simpson_sum<F>(f: &F, x: f64, upper_bound: f64, subdivisions: usize) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let h = upper_bound / subdivisions as f64;

    let mut sum = f(0.0, x) + f(upper_bound, x);
    for i in 1..subdivisions {
        let t = i as f64 * h;
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(t, x);
    }

    sum * h / 3.0
}

/// Simpson integrator with a subdivision count validated once up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpsonIntegrator {
    subdivisions: usize,
}

impl SimpsonIntegrator {
    pub fn new(subdivisions: usize) -> Result<Self> {
        validate_subdivisions(subdivisions)?;
        Ok(Self { subdivisions })
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    /// Integrate `f(t, x)` over `[0, upper_bound]`; see [`integrate`]
    pub fn integrate<F>(&self, f: F, x: f64, upper_bound: f64) -> Result<f64>
    where
        F: Fn(f64, f64) -> f64,
    {
        integrate(f, x, upper_bound, self.subdivisions)
    }
}

impl Default for SimpsonIntegrator {
    fn default() -> Self {
        Self {
            subdivisions: crate::assumptions::DEFAULT_QUADRATURE_STEPS,
        }
    }
}
