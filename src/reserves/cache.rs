//! Memoisation of issue-date factors for net premium calculation
//!
//! The net premium depends only on the issue age, term and sum insured, and
//! the sum insured enters linearly outside the integrals. Caching the two
//! issue factors per (issue age, term) lets every policy sharing that cell
//! skip two integrals. The premium is still formed by the same expression from
//! the same f64 factors, so cached and uncached results are bit-identical.
//!
//! A cache is bound to the assumption set it was filled under; handing it to
//! an engine with a different basis clears it.

use std::collections::HashMap;

use super::types::IssueFactors;
use crate::assumptions::ActuarialAssumptions;

/// Cache key: issue age and term in whole years
pub type IssueCell = (u32, u32);

/// Issue-factor cache with hit/miss statistics
#[derive(Debug, Default)]
pub struct IssueFactorCache {
    /// Assumption set the entries were computed under
    basis: Option<ActuarialAssumptions>,

    /// Cached factors by (issue age, term)
    entries: HashMap<IssueCell, IssueFactors>,

    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl IssueFactorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the cache to `assumptions`, dropping entries from any other basis
    pub fn bind(&mut self, assumptions: &ActuarialAssumptions) {
        if self.basis.as_ref() != Some(assumptions) {
            if !self.entries.is_empty() {
                log::debug!("issue factor cache rebound; dropping {} entries", self.entries.len());
            }
            self.entries.clear();
            self.basis = Some(assumptions.clone());
        }
    }

    /// Cached factors for a cell, recording a hit or miss
    pub fn lookup(&mut self, cell: IssueCell) -> Option<IssueFactors> {
        match self.entries.get(&cell) {
            Some(factors) => {
                self.cache_hits += 1;
                Some(*factors)
            }
            None => {
                self.cache_misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, cell: IssueCell, factors: IssueFactors) {
        self.entries.insert(cell, factors);
    }

    /// Clear all cached data and statistics
    pub fn clear(&mut self) {
        self.entries.clear();
        self.basis = None;
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
