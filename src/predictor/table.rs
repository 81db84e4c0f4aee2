//! A table of saturating counters.

use crate::predictor::counter::SaturatingCounter;

/// A fixed-size table of [SaturatingCounter], sized as a power of two and
/// indexed by a masked value computed by the owning predictor.
pub struct CounterTable {
    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Number of entries
    size: usize,
}

impl CounterTable {
    /// Create a table with `1 << index_bits` entries, every counter seeded
    /// to `init`.
    pub fn new(index_bits: usize, init: u8) -> Self {
        let size = 1usize << index_bits;
        Self {
            data: vec![SaturatingCounter::new(init); size],
            size,
        }
    }

    /// Returns the number of entries in the table.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns a bitmask corresponding to the number of entries in the table.
    pub fn index_mask(&self) -> usize {
        assert!(self.size.is_power_of_two());
        self.size - 1
    }

    /// Returns a reference to an entry in the table.
    pub fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        let index = idx & self.index_mask();
        &self.data[index]
    }

    /// Returns a mutable reference to an entry in the table.
    pub fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }

    /// Return the raw counter states in index order, for the report path.
    pub fn contents(&self) -> Vec<u8> {
        self.data.iter().map(|c| c.value()).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::Outcome;
    use crate::predictor::counter::WEAKLY_TAKEN;

    #[test]
    fn seeded_uniformly() {
        let table = CounterTable::new(3, WEAKLY_TAKEN);
        assert_eq!(table.size(), 8);
        assert!(table.contents().iter().all(|&v| v == 2));
    }

    #[test]
    fn indexing_is_masked() {
        let mut table = CounterTable::new(2, WEAKLY_TAKEN);
        table.get_entry_mut(0x13).update(Outcome::T);
        // 0x13 & 0b11 == 3
        assert_eq!(table.get_entry(3).value(), 3);
    }

    #[test]
    fn contents_are_idempotent() {
        let mut table = CounterTable::new(2, WEAKLY_TAKEN);
        table.get_entry_mut(1).update(Outcome::N);
        assert_eq!(table.contents(), table.contents());
    }
}
