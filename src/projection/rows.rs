//! Output structures for reserve projections and portfolio snapshots

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reserves::ReserveValue;

/// One row of a reserve projection, at a whole policy year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub elapsed_years: u32,
    pub attained_age: u32,
    pub remaining_term: u32,
    pub assurance_factor: f64,
    pub annuity_factor: f64,
    pub reserve: f64,
}

impl ProjectionRow {
    pub(crate) fn from_value(elapsed_years: u32, attained_age: u32, remaining_term: u32, value: &ReserveValue) -> Self {
        Self {
            elapsed_years,
            attained_age,
            remaining_term,
            assurance_factor: value.assurance_factor,
            annuity_factor: value.annuity_factor,
            reserve: value.reserve,
        }
    }
}

/// Year-by-year reserve projection for one policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Policy identifier
    pub policy_id: u32,

    /// Net premium fixed at issue
    pub net_premium: f64,

    /// Rows ordered by elapsed year, issue through maturity
    pub rows: Vec<ProjectionRow>,
}

impl ProjectionResult {
    pub fn new(policy_id: u32, net_premium: f64) -> Self {
        Self {
            policy_id,
            net_premium,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: ProjectionRow) {
        self.rows.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let (peak_year, peak_reserve) = self
            .rows
            .iter()
            .fold((0, 0.0_f64), |(year, peak), row| {
                if row.reserve > peak {
                    (row.elapsed_years, row.reserve)
                } else {
                    (year, peak)
                }
            });

        ProjectionSummary {
            total_years: self.rows.len() as u32,
            peak_reserve,
            peak_year,
            final_reserve: self.rows.last().map(|r| r.reserve).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Number of rows, issue and maturity included
    pub total_years: u32,
    /// Largest positive reserve over the term (0 if none is positive)
    pub peak_reserve: f64,
    pub peak_year: u32,
    pub final_reserve: f64,
}

/// Point-in-time reserve for one in-force policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuationEntry {
    pub policy_id: u32,
    pub elapsed_years: u32,
    pub reserve: f64,
}

/// Portfolio snapshot at a valuation date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub valuation_date: NaiveDate,

    /// One entry per in-force policy, in input order
    pub entries: Vec<PortfolioValuationEntry>,

    pub total_reserve: f64,

    pub policies_valued: usize,

    /// Policies not in force at the valuation date
    pub policies_skipped: usize,
}

impl PortfolioValuation {
    pub(crate) fn from_entries(
        valuation_date: NaiveDate,
        entries: Vec<PortfolioValuationEntry>,
        policies_skipped: usize,
    ) -> Self {
        // Summed in input order so parallel and sequential runs agree exactly
        let total_reserve = entries.iter().map(|e| e.reserve).sum();
        Self {
            valuation_date,
            policies_valued: entries.len(),
            entries,
            total_reserve,
            policies_skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: u32, reserve: f64) -> ProjectionRow {
        ProjectionRow {
            elapsed_years: t,
            attained_age: 45 + t,
            remaining_term: 3 - t,
            assurance_factor: 0.0,
            annuity_factor: 0.0,
            reserve,
        }
    }

    #[test]
    fn test_summary() {
        let mut result = ProjectionResult::new(1, 120.0);
        for (t, v) in [(0, 0.0), (1, 35.0), (2, 20.0), (3, 0.0)] {
            result.add_row(row(t, v));
        }

        let summary = result.summary();
        assert_eq!(summary.total_years, 4);
        assert_eq!(summary.peak_reserve, 35.0);
        assert_eq!(summary.peak_year, 1);
        assert_eq!(summary.final_reserve, 0.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ProjectionResult::new(1, 0.0).summary();
        assert_eq!(summary.total_years, 0);
        assert_eq!(summary.final_reserve, 0.0);
    }

    #[test]
    fn test_portfolio_totals() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let entries = vec![
            PortfolioValuationEntry { policy_id: 1, elapsed_years: 2, reserve: 100.5 },
            PortfolioValuationEntry { policy_id: 2, elapsed_years: 0, reserve: -0.5 },
        ];

        let valuation = PortfolioValuation::from_entries(date, entries, 3);
        assert_eq!(valuation.total_reserve, 100.0);
        assert_eq!(valuation.policies_valued, 2);
        assert_eq!(valuation.policies_skipped, 3);
    }
}
