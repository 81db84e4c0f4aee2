//! Predictor scheme configuration.

use thiserror::Error;

/// Widest supported table index, in bits.
pub const MAX_INDEX_BITS: usize = 30;

/// Invalid predictor parameters, rejected before any table is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("index width {0} out of range (expected 1..={MAX_INDEX_BITS})")]
    IndexWidth(usize),

    #[error("history width {n} exceeds gshare index width {m1}")]
    HistoryWidth { n: usize, m1: usize },
}

/// Parameters for one predictor scheme, fixed at construction.
///
/// Widths are validated up front: an inconsistent pair such as N > M1
/// would otherwise shift by an out-of-range amount inside the gshare
/// index function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeConfig {
    /// Bimodal predictor with an M2-bit table index.
    Bimodal { m2: usize },

    /// Gshare predictor with an M1-bit table index folding N history bits.
    Gshare { m1: usize, n: usize },

    /// Tournament of the two, arbitrated by a K-bit chooser table.
    Hybrid {
        k: usize,
        m1: usize,
        n: usize,
        m2: usize,
    },
}

impl SchemeConfig {
    /// The scheme name as given on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bimodal { .. } => "bimodal",
            Self::Gshare { .. } => "gshare",
            Self::Hybrid { .. } => "hybrid",
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Bimodal { m2 } => {
                check_width(m2)?;
            }
            Self::Gshare { m1, n } => {
                check_width(m1)?;
                check_width(n)?;
                check_history(n, m1)?;
            }
            Self::Hybrid { k, m1, n, m2 } => {
                check_width(k)?;
                check_width(m1)?;
                check_width(n)?;
                check_width(m2)?;
                check_history(n, m1)?;
            }
        }
        Ok(())
    }
}

fn check_width(bits: usize) -> Result<(), ConfigError> {
    if bits == 0 || bits > MAX_INDEX_BITS {
        return Err(ConfigError::IndexWidth(bits));
    }
    Ok(())
}

fn check_history(n: usize, m1: usize) -> Result<(), ConfigError> {
    if n > m1 {
        return Err(ConfigError::HistoryWidth { n, m1 });
    }
    Ok(())
}
