//! Hybrid (tournament) branch predictor.

use crate::branch::Outcome;
use crate::predictor::bimodal::BimodalPredictor;
use crate::predictor::counter::WEAKLY_NOT_TAKEN;
use crate::predictor::gshare::GsharePredictor;
use crate::predictor::table::CounterTable;
use crate::stats::PredictionStats;

/// Which sub-predictor the chooser trusts for a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Bimodal,
    Gshare,
}

/// A tournament predictor arbitrating between gshare and bimodal with a
/// learned chooser table.
///
/// Per record, both sub-predictors always predict (and their prediction
/// counts advance). Only the *selected* sub-predictor's counter table is
/// updated with the outcome, but the gshare history register advances on
/// every record regardless of selection.
pub struct HybridPredictor {
    /// Chooser table: 0-1 select bimodal, 2-3 select gshare.
    chooser: CounterTable,
    chooser_bits: usize,
    bimodal: BimodalPredictor,
    gshare: GsharePredictor,
    stats: PredictionStats,
}

impl HybridPredictor {
    pub fn new(
        chooser_bits: usize,
        gshare_pc_bits: usize,
        history_bits: usize,
        bimodal_bits: usize,
    ) -> Self {
        Self {
            chooser: CounterTable::new(chooser_bits, WEAKLY_NOT_TAKEN),
            chooser_bits,
            bimodal: BimodalPredictor::new(bimodal_bits),
            gshare: GsharePredictor::new(gshare_pc_bits, history_bits),
            stats: PredictionStats::new(),
        }
    }

    /// index = (pc >> 2) & (2^K - 1)
    fn chooser_index(&self, pc: u64) -> usize {
        ((pc >> 2) as usize) & self.chooser.index_mask()
    }

    /// Read the chooser for this branch and count the hybrid prediction.
    fn select(&mut self, pc: u64) -> Selection {
        self.stats.record_prediction();
        match self.chooser.get_entry(self.chooser_index(pc)).predict() {
            Outcome::T => Selection::Gshare,
            Outcome::N => Selection::Bimodal,
        }
    }

    /// Strengthen the chooser toward whichever sub-predictor was uniquely
    /// correct; leave it alone when they tie.
    fn update_chooser(
        &mut self,
        pc: u64,
        gshare_prediction: Outcome,
        bimodal_prediction: Outcome,
        outcome: Outcome,
    ) {
        let gshare_correct = gshare_prediction == outcome;
        let bimodal_correct = bimodal_prediction == outcome;
        if gshare_correct == bimodal_correct {
            return;
        }
        let entry = self.chooser.get_entry_mut(self.chooser_index(pc));
        entry.update(Outcome::from(gshare_correct));
    }

    /// Run one trace record through the tournament and return the chosen
    /// prediction.
    ///
    /// The chooser is read before any state changes; the selected
    /// sub-predictor's table is updated; the history register advances
    /// exactly once on both paths; the chooser is updated last.
    pub fn process(&mut self, pc: u64, outcome: Outcome) -> Outcome {
        let bimodal_prediction = self.bimodal.predict(pc);
        let gshare_prediction = self.gshare.predict(pc);

        let chosen = match self.select(pc) {
            Selection::Gshare => {
                self.gshare.update(pc, outcome);
                gshare_prediction
            }
            Selection::Bimodal => {
                self.bimodal.update(pc, outcome);
                bimodal_prediction
            }
        };
        self.gshare.update_history(outcome);

        if chosen != outcome {
            self.stats.record_misprediction();
        }
        self.update_chooser(pc, gshare_prediction, bimodal_prediction, outcome);
        chosen
    }

    pub fn chooser_bits(&self) -> usize {
        self.chooser_bits
    }

    pub fn bimodal(&self) -> &BimodalPredictor {
        &self.bimodal
    }

    pub fn gshare(&self) -> &GsharePredictor {
        &self.gshare
    }

    pub fn stats(&self) -> &PredictionStats {
        &self.stats
    }

    pub fn chooser_contents(&self) -> Vec<u8> {
        self.chooser.contents()
    }
}
