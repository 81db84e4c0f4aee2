//! Gshare branch predictor.

use crate::branch::Outcome;
use crate::history::GlobalHistoryRegister;
use crate::predictor::counter::WEAKLY_TAKEN;
use crate::predictor::table::CounterTable;
use crate::stats::PredictionStats;

/// A predictor indexed by the instruction address folded with global
/// branch history.
///
/// The table index takes the top N bits of the M1-bit masked address field
/// XORed with the N-bit history register; the remaining low M1-N address
/// bits pass through unchanged. The history register is owned here and is
/// advanced exactly once per record by [`Self::update_history`], after the
/// table update.
pub struct GsharePredictor {
    table: CounterTable,
    /// M1: number of address bits forming the index
    pc_bits: usize,
    /// N: number of history bits folded into the index
    history_bits: usize,
    history: GlobalHistoryRegister,
    stats: PredictionStats,
}

impl GsharePredictor {
    pub fn new(pc_bits: usize, history_bits: usize) -> Self {
        assert!(history_bits >= 1 && history_bits <= pc_bits);
        Self {
            table: CounterTable::new(pc_bits, WEAKLY_TAKEN),
            pc_bits,
            history_bits,
            history: GlobalHistoryRegister::new(history_bits),
            stats: PredictionStats::new(),
        }
    }

    /// pc    = (addr >> 2) & (2^M1 - 1)
    /// top   = pc >> (M1 - N)
    /// index = ((top ^ history) << (M1 - N)) | (pc & (2^(M1-N) - 1))
    fn index(&self, pc: u64) -> usize {
        let pc_field = ((pc >> 2) as usize) & self.table.index_mask();
        let low_bits = self.pc_bits - self.history_bits;
        let top = pc_field >> low_bits;
        let folded = top ^ self.history.value();
        (folded << low_bits) | (pc_field & ((1 << low_bits) - 1))
    }

    /// Return the predicted direction for this branch and count the
    /// prediction.
    pub fn predict(&mut self, pc: u64) -> Outcome {
        self.stats.record_prediction();
        self.table.get_entry(self.index(pc)).predict()
    }

    /// Apply the resolved outcome to the counter for this branch.
    ///
    /// The index is re-derived against the same history the prediction
    /// saw; a misprediction is counted against the pre-update counter
    /// state. This call does not touch the history register.
    pub fn update(&mut self, pc: u64, outcome: Outcome) {
        let idx = self.index(pc);
        let entry = self.table.get_entry_mut(idx);
        if entry.predict() != outcome {
            self.stats.record_misprediction();
        }
        entry.update(outcome);
    }

    /// Shift the resolved outcome into the global history register.
    pub fn update_history(&mut self, outcome: Outcome) {
        self.history.shift_in(outcome);
    }

    pub fn history(&self) -> &GlobalHistoryRegister {
        &self.history
    }

    pub fn index_bits(&self) -> usize {
        self.pc_bits
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
    fn index_folds_top_bits_with_history() {
        // M1=2, N=1, history 0: pc field of 0x4 is 1, top bit 0,
        // index = (0 ^ 0) << 1 | 1 = 1.
        let p = GsharePredictor::new(2, 1);
        assert_eq!(p.index(0x4), 1);
    }

    #[test]
    fn index_is_deterministic_for_fixed_history() {
        let mut p = GsharePredictor::new(6, 4);
        p.update_history(Outcome::T);
        p.update_history(Outcome::N);
        p.update_history(Outcome::T);
        assert_eq!(p.index(0x7b4), p.index(0x7b4));
    }

    #[test]
    fn full_history_width_xors_whole_field() {
        // M1 == N: the entire pc field XORs against the register.
        let mut p = GsharePredictor::new(3, 3);
        for _ in 0..3 {
            p.update_history(Outcome::T);
        }
        // pc field of 0x14 is 0b101; history is 0b111.
        assert_eq!(p.index(0x14), 0b010);
    }

    #[test]
    fn single_record_scenario() {
        let mut p = GsharePredictor::new(2, 1);
        let predicted = p.predict(0x4);
        assert_eq!(predicted, Outcome::T);
        p.update(0x4, Outcome::T);
        p.update_history(Outcome::T);

        assert_eq!(p.history().value(), 1);
        assert_eq!(p.table_contents(), vec![2, 3, 2, 2]);
        assert_eq!(p.stats().predictions(), 1);
        assert_eq!(p.stats().mispredictions(), 0);
    }

    #[test]
    fn confirming_update_never_mispredicts() {
        let mut p = GsharePredictor::new(4, 2);
        for pc in [0x10u64, 0x24, 0x38, 0x10] {
            let predicted = p.predict(pc);
            p.update(pc, predicted);
            p.update_history(predicted);
        }
        assert_eq!(p.stats().mispredictions(), 0);
    }
}
