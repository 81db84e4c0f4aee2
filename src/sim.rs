//! Trace-driven simulation and final reporting.

use std::io::{self, Write};

use crate::branch::BranchRecord;
use crate::config::{ConfigError, SchemeConfig};
use crate::predictor::bimodal::BimodalPredictor;
use crate::predictor::gshare::GsharePredictor;
use crate::predictor::hybrid::HybridPredictor;
use crate::stats::{BranchProfile, PredictionStats};

/// The closed set of simulated predictor schemes.
pub enum Predictor {
    Bimodal(BimodalPredictor),
    Gshare(GsharePredictor),
    Hybrid(HybridPredictor),
}

impl Predictor {
    fn build(config: SchemeConfig) -> Self {
        match config {
            SchemeConfig::Bimodal { m2 } => Self::Bimodal(BimodalPredictor::new(m2)),
            SchemeConfig::Gshare { m1, n } => Self::Gshare(GsharePredictor::new(m1, n)),
            SchemeConfig::Hybrid { k, m1, n, m2 } => {
                Self::Hybrid(HybridPredictor::new(k, m1, n, m2))
            }
        }
    }
}

/// Drives one predictor over a trace, one record at a time, and renders
/// the final statistics and table contents.
pub struct Simulator {
    config: SchemeConfig,
    predictor: Predictor,
    profile: BranchProfile,
}

impl Simulator {
    /// Validate the configuration and size the predictor tables.
    pub fn new(config: SchemeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            predictor: Predictor::build(config),
            profile: BranchProfile::new(),
        })
    }

    /// Process one trace record: predict, then update the predictor state
    /// with the resolved outcome. A record's sequence completes before the
    /// next record is read.
    pub fn step(&mut self, record: &BranchRecord) {
        let prediction = match &mut self.predictor {
            Predictor::Bimodal(p) => {
                let prediction = p.predict(record.pc);
                p.update(record.pc, record.outcome);
                prediction
            }
            Predictor::Gshare(p) => {
                let prediction = p.predict(record.pc);
                p.update(record.pc, record.outcome);
                p.update_history(record.outcome);
                prediction
            }
            Predictor::Hybrid(p) => p.process(record.pc, record.outcome),
        };
        self.profile.update(record, prediction);
    }

    /// Run every record of a trace in order.
    pub fn run(&mut self, records: &[BranchRecord]) {
        for record in records {
            self.step(record);
        }
    }

    pub fn config(&self) -> SchemeConfig {
        self.config
    }

    /// The statistics of the scheme under measurement (the hybrid's own
    /// counters in hybrid mode, not a sub-predictor's).
    pub fn stats(&self) -> &PredictionStats {
        match &self.predictor {
            Predictor::Bimodal(p) => p.stats(),
            Predictor::Gshare(p) => p.stats(),
            Predictor::Hybrid(p) => p.stats(),
        }
    }

    pub fn profile(&self) -> &BranchProfile {
        &self.profile
    }

    /// Write the final report: the `OUTPUT` statistics block followed by
    /// the contents of every live counter table.
    pub fn write_report(&self, w: &mut impl Write) -> io::Result<()> {
        let stats = self.stats();
        writeln!(w, "OUTPUT")?;
        writeln!(w, " number of predictions:    {}", stats.predictions())?;
        writeln!(w, " number of mispredictions: {}", stats.mispredictions())?;
        writeln!(
            w,
            " misprediction rate:       {:.2}%",
            stats.misprediction_rate()
        )?;

        match &self.predictor {
            Predictor::Bimodal(p) => {
                write_table(w, "FINAL BIMODAL CONTENTS", &p.table_contents())?;
            }
            Predictor::Gshare(p) => {
                write_table(w, "FINAL GSHARE CONTENTS", &p.table_contents())?;
            }
            Predictor::Hybrid(p) => {
                write_table(w, "FINAL CHOOSER CONTENTS", &p.chooser_contents())?;
                write_table(w, "FINAL GSHARE CONTENTS", &p.gshare().table_contents())?;
                write_table(w, "FINAL BIMODAL CONTENTS", &p.bimodal().table_contents())?;
            }
        }
        Ok(())
    }

    /// Write the `n` most executed branches with their per-branch hit
    /// rates.
    pub fn write_profile(&self, w: &mut impl Write, n: usize) -> io::Result<()> {
        writeln!(w, "PROFILE")?;
        writeln!(
            w,
            " unique branches: {}",
            self.profile.num_unique_branches()
        )?;
        for (pc, data) in self.profile.most_executed(n) {
            writeln!(
                w,
                " {:x}  occ={}  hits={}  hit rate={:.2}%",
                pc,
                data.occ,
                data.hits,
                data.hit_rate() * 100.0
            )?;
        }
        Ok(())
    }
}

fn write_table(w: &mut impl Write, title: &str, contents: &[u8]) -> io::Result<()> {
    writeln!(w, "{}", title)?;
    for (i, value) in contents.iter().enumerate() {
        writeln!(w, " {}      {}", i, value)?;
    }
    Ok(())
}
