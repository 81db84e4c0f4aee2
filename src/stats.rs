//! Helpers for collecting prediction statistics.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::branch::{BranchRecord, Outcome};

/// Per-scheme prediction statistics.
///
/// `predictions` advances once per predict call and `mispredictions` once
/// per update whose pre-update predicted direction contradicts the outcome.
/// Both are monotone for the life of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictionStats {
    predictions: u64,
    mispredictions: u64,
}

impl PredictionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_prediction(&mut self) {
        self.predictions += 1;
    }

    pub fn record_misprediction(&mut self) {
        self.mispredictions += 1;
    }

    pub fn predictions(&self) -> u64 {
        self.predictions
    }

    pub fn mispredictions(&self) -> u64 {
        self.mispredictions
    }

    /// Return the misprediction rate as a percentage.
    ///
    /// Callers must have processed at least one record; the rate of an
    /// empty run is not defined.
    pub fn misprediction_rate(&self) -> f64 {
        self.mispredictions as f64 / self.predictions as f64 * 100.0
    }
}

/// Per-branch occurrence/hit counts (keyed by program counter value),
/// collected alongside the scheme statistics for profiling reports.
pub struct BranchProfile {
    data: BTreeMap<u64, BranchData>,
}

impl BranchProfile {
    pub fn new() -> Self {
        Self { data: BTreeMap::new() }
    }

    /// Record one executed branch and whether the scheme predicted it.
    pub fn update(&mut self, record: &BranchRecord, prediction: Outcome) {
        let entry = self.data.entry(record.pc).or_insert(BranchData::new());
        entry.occ += 1;
        if prediction == record.outcome {
            entry.hits += 1;
        }
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: u64) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Return the `n` most frequently executed branches, most common first.
    pub fn most_executed(&self, n: usize) -> Vec<(u64, &BranchData)> {
        self.data.iter()
            .sorted_by_key(|(_, entry)| entry.occ)
            .rev()
            .take(n)
            .map(|(pc, entry)| (*pc, entry))
            .collect()
    }
}

impl Default for BranchProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: u64,

    /// Number of correct predictions for this branch.
    pub hits: u64,
}

impl BranchData {
    pub fn new() -> Self {
        Self { occ: 0, hits: 0 }
    }

    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rate_is_a_percentage() {
        let mut stats = PredictionStats::new();
        for _ in 0..3 {
            stats.record_prediction();
        }
        stats.record_misprediction();
        assert_eq!(stats.predictions(), 3);
        assert_eq!(stats.mispredictions(), 1);
        assert!((stats.misprediction_rate() - 33.333333).abs() < 1e-4);
    }

    #[test]
    fn profile_orders_by_occurrence() {
        let mut profile = BranchProfile::new();
        let a = BranchRecord::new(0x40, Outcome::T);
        let b = BranchRecord::new(0x80, Outcome::N);
        profile.update(&a, Outcome::T);
        profile.update(&a, Outcome::N);
        profile.update(&b, Outcome::N);

        let top = profile.most_executed(2);
        assert_eq!(top[0].0, 0x40);
        assert_eq!(top[0].1.occ, 2);
        assert_eq!(top[0].1.hits, 1);
        assert_eq!(top[1].0, 0x80);
        assert_eq!(top[1].1.hits, 1);
    }
}
