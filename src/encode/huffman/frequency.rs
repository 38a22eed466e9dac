// src/encode/huffman/frequency.rs

use crate::utils::error::{CodecError, Result};
use std::collections::BTreeMap;

/// Occurrence count of every distinct byte in a message.
///
/// Built once per message and never modified afterwards. Iteration runs in
/// ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Counts each byte of `message`. An empty message yields an empty table.
    pub fn from_message(message: &[u8]) -> Self {
        let mut counts = BTreeMap::new();
        for &byte in message {
            *counts.entry(byte).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Builds a table from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols have their counts summed. A zero count is rejected
    /// since such a symbol could never be coded.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = BTreeMap::new();
        for (symbol, count) in pairs {
            if count == 0 {
                return Err(CodecError::invalid_input(format!(
                    "symbol {:#04x} has a zero frequency",
                    symbol
                )));
            }
            *counts.entry(symbol).or_insert(0) += count;
        }
        Ok(Self { counts })
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the message length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}
