//! Implementation of a 2-bit saturating counter.

use crate::branch::Outcome;

/// Counter state predicting "weakly taken"; the seed for predictor tables.
pub const WEAKLY_TAKEN: u8 = 2;

/// Counter state one step below the taken/not-taken boundary; the seed for
/// the hybrid chooser table ("weakly prefer bimodal").
pub const WEAKLY_NOT_TAKEN: u8 = 1;

/// A 2-bit saturating counter used to follow the behavior of a branch.
///
/// States 0 and 1 predict not-taken, states 2 and 3 predict taken.
/// A taken outcome moves the state toward 3 and a not-taken outcome moves
/// it toward 0; the state saturates at both ends and never wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    state: u8,
}

impl SaturatingCounter {
    pub const MAX: u8 = 3;

    pub fn new(init: u8) -> Self {
        assert!(init <= Self::MAX);
        Self { state: init }
    }

    /// Return the raw 2-bit state.
    pub fn value(&self) -> u8 {
        self.state
    }

    /// Return the current predicted direction.
    pub fn predict(&self) -> Outcome {
        Outcome::from(self.state >= 2)
    }

    /// Move the counter one step toward the observed outcome.
    pub fn update(&mut self, outcome: Outcome) {
        self.state = match outcome {
            Outcome::T => (self.state + 1).min(Self::MAX),
            Outcome::N => self.state.saturating_sub(1),
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn saturates_at_both_ends() {
        let mut ctr = SaturatingCounter::new(WEAKLY_TAKEN);
        for _ in 0..8 {
            ctr.update(Outcome::T);
            assert!(ctr.value() <= 3);
        }
        assert_eq!(ctr.value(), 3);
        for _ in 0..8 {
            ctr.update(Outcome::N);
            assert!(ctr.value() <= 3);
        }
        assert_eq!(ctr.value(), 0);
    }

    #[test]
    fn prediction_boundary() {
        assert_eq!(SaturatingCounter::new(0).predict(), Outcome::N);
        assert_eq!(SaturatingCounter::new(1).predict(), Outcome::N);
        assert_eq!(SaturatingCounter::new(2).predict(), Outcome::T);
        assert_eq!(SaturatingCounter::new(3).predict(), Outcome::T);
    }

    #[test]
    fn walks_one_step_per_update() {
        let mut ctr = SaturatingCounter::new(WEAKLY_NOT_TAKEN);
        ctr.update(Outcome::T);
        assert_eq!(ctr.value(), 2);
        ctr.update(Outcome::N);
        assert_eq!(ctr.value(), 1);
        ctr.update(Outcome::N);
        assert_eq!(ctr.value(), 0);
    }
}
