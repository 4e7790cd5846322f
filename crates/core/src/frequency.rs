//! Byte frequency counting.
//!
//! A `FrequencyTable` remembers the order in which symbols were first seen.
//! That order is written to the container and seeds the tree builder's
//! tie-break counter, so the decoder rebuilds exactly the encoder's tree
//! from the table alone.

use crate::error::{CorruptError, Result};

/// Occurrence counts of byte values, in first-occurrence order.
///
/// # Invariants
/// - every stored count is >= 1
/// - a symbol appears at most once
/// - `total()` equals the length of the counted input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// (symbol, count) in first-occurrence order
    entries: Vec<(u8, u64)>,
    /// Position of each symbol in `entries`
    index: [Option<u8>; 256],
}

impl FrequencyTable {
    /// Count every byte of `bytes`. Empty input gives an empty table.
    pub fn build(bytes: &[u8]) -> Self {
        let mut table = Self::empty();
        for &byte in bytes {
            match table.index[byte as usize] {
                Some(slot) => table.entries[slot as usize].1 += 1,
                None => table.push(byte, 1),
            }
        }
        table
    }

    /// Build a table from explicit entries, e.g. those read from a container.
    ///
    /// # Errors
    /// - `CorruptError::ZeroFrequency` for a zero count
    /// - `CorruptError::DuplicateSymbol` when a symbol repeats
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = Self::empty();
        for (symbol, count) in entries {
            if count == 0 {
                return Err(CorruptError::ZeroFrequency { symbol }.into());
            }
            if table.index[symbol as usize].is_some() {
                return Err(CorruptError::DuplicateSymbol { symbol }.into());
            }
            table.push(symbol, count);
        }
        Ok(table)
    }

    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: [None; 256],
        }
    }

    fn push(&mut self, symbol: u8, count: u64) {
        // at most 256 distinct symbols, so the slot fits in a u8
        self.index[symbol as usize] = Some(self.entries.len() as u8);
        self.entries.push((symbol, count));
    }

    /// Count for `symbol`, or `None` if it never occurred.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.index[symbol as usize].map(|slot| self.entries[slot as usize].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// (symbol, count) pairs in first-occurrence order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u8, u64)> + '_ {
        self.entries.iter().copied()
    }
}
