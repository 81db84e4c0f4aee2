//! Trace-driven simulation of bimodal, gshare, and hybrid (tournament)
//! branch predictors.
//!
//! The library models the predictor state machines exactly at the bit
//! level: table indexing, 2-bit saturating counter transitions, the global
//! history shift register, and tournament selection/chooser updates. The
//! [sim] module drives a predictor over a parsed trace and renders the
//! final statistics and table contents.

pub mod branch;
pub mod config;
pub mod history;
pub mod predictor;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use config::*;
pub use history::*;
pub use predictor::*;
pub use sim::*;
pub use stats::*;
pub use trace::*;
