//! Implementations of different branch predictors.

pub mod bimodal;
pub mod counter;
pub mod gshare;
pub mod hybrid;
pub mod table;

pub use bimodal::*;
pub use counter::*;
pub use gshare::*;
pub use hybrid::*;
pub use table::*;
