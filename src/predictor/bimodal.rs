//! Bimodal branch predictor.

use crate::branch::Outcome;
use crate::predictor::counter::WEAKLY_TAKEN;
use crate::predictor::table::CounterTable;
use crate::stats::PredictionStats;

/// A predictor indexed purely by the instruction address.
///
/// The counter table holds `1 << index_bits` 2-bit counters, all seeded to
/// weakly-taken, indexed by the low address bits above the two alignment
/// bits.
pub struct BimodalPredictor {
    table: CounterTable,
    index_bits: usize,
    stats: PredictionStats,
}

impl BimodalPredictor {
    pub fn new(index_bits: usize) -> Self {
        Self {
            table: CounterTable::new(index_bits, WEAKLY_TAKEN),
            index_bits,
            stats: PredictionStats::new(),
        }
    }

    /// index = (pc >> 2) & (2^M - 1)
    fn index(&self, pc: u64) -> usize {
        ((pc >> 2) as usize) & self.table.index_mask()
    }

    /// Return the predicted direction for this branch and count the
    /// prediction.
    pub fn predict(&mut self, pc: u64) -> Outcome {
        self.stats.record_prediction();
        self.table.get_entry(self.index(pc)).predict()
    }

    /// Apply the resolved outcome to the counter for this branch.
    ///
    /// A misprediction is counted against the *pre-update* counter state,
    /// then the counter takes one saturating step toward the outcome.
    pub fn update(&mut self, pc: u64, outcome: Outcome) {
        let entry = self.table.get_entry_mut(self.index(pc));
        if entry.predict() != outcome {
            self.stats.record_misprediction();
        }
        entry.update(outcome);
    }

    pub fn index_bits(&self) -> usize {
        self.index_bits
    }

    pub fn stats(&self) -> &PredictionStats {
        &self.stats
    }

    pub fn table_contents(&self) -> Vec<u8> {
        self.table.contents()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn index_discards_alignment_bits() {
        let p = BimodalPredictor::new(4);
        assert_eq!(p.index(0x0), 0);
        assert_eq!(p.index(0x4), 1);
        assert_eq!(p.index(0x44), 0x11 & 0xf);
    }

    #[test]
    fn confirming_update_never_mispredicts() {
        let mut p = BimodalPredictor::new(3);
        for pc in [0x0u64, 0x4, 0x1c, 0x20] {
            let predicted = p.predict(pc);
            p.update(pc, predicted);
        }
        assert_eq!(p.stats().predictions(), 4);
        assert_eq!(p.stats().mispredictions(), 0);
    }

    // M=1, trace [(0x0,t),(0x0,t),(0x0,n)]: counter at index 0 runs
    // 2 -> 3 -> 3 (saturated) -> 2, with one misprediction on the final
    // not-taken outcome.
    #[test]
    fn two_entry_table_scenario() {
        let mut p = BimodalPredictor::new(1);
        assert_eq!(p.table_contents(), vec![2, 2]);

        assert_eq!(p.predict(0x0), Outcome::T);
        p.update(0x0, Outcome::T);
        assert_eq!(p.table_contents()[0], 3);

        assert_eq!(p.predict(0x0), Outcome::T);
        p.update(0x0, Outcome::T);
        assert_eq!(p.table_contents()[0], 3);

        assert_eq!(p.predict(0x0), Outcome::T);
        p.update(0x0, Outcome::N);
        assert_eq!(p.table_contents()[0], 2);

        assert_eq!(p.stats().predictions(), 3);
        assert_eq!(p.stats().mispredictions(), 1);
        assert!((p.stats().misprediction_rate() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn counters_never_leave_range() {
        let mut p = BimodalPredictor::new(2);
        let outcomes = [
            Outcome::T, Outcome::T, Outcome::T, Outcome::N, Outcome::N,
            Outcome::N, Outcome::N, Outcome::T, Outcome::N, Outcome::T,
        ];
        for (i, outcome) in outcomes.iter().enumerate() {
            let pc = (i as u64 % 4) << 2;
            let _ = p.predict(pc);
            p.update(pc, *outcome);
            assert!(p.table_contents().iter().all(|&v| v <= 3));
        }
    }
}
