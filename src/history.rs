//! Global branch history register.

use bitvec::prelude::*;

use crate::branch::Outcome;

/// An N-bit global history shift register.
///
/// The register records the N most recent branch outcomes. On each resolved
/// branch the register shifts one position toward the least-significant bit
/// and the newest outcome occupies the top bit (index N-1).
pub struct GlobalHistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for GlobalHistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl GlobalHistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len >= 1);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }

    /// Return the integer view of the register (bit 0 is the oldest
    /// surviving outcome, bit N-1 the newest).
    pub fn value(&self) -> usize {
        self.data.load::<usize>()
    }

    /// Record a resolved outcome: shift the register right by one bit and
    /// insert the new outcome at the top.
    ///
    /// Equivalent to `history = (history >> 1) | (bit << (N-1))`.
    pub fn shift_in(&mut self, outcome: Outcome) {
        if self.len > 1 {
            self.data.shift_start(1);
        }
        self.data.set(self.len - 1, outcome.bit());
    }
}
