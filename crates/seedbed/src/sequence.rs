//! Named monotonic sequences for serial and document numbers
//!
//! Bond numbers, invoice numbers, and credit serials come from counters
//! owned by the seed context and passed around explicitly, not from hidden
//! per-seeder instance fields.

use std::collections::HashMap;

/// A set of named counters, each starting at 1
#[derive(Debug, Default)]
pub struct SequenceSet {
    counters: HashMap<String, u64>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next value of the named sequence
    pub fn next(&mut self, name: &str) -> u64 {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Next value rendered as a zero-padded document number, e.g.
    /// `formatted("invoice", "INV-", 6)` -> `INV-000001`
    pub fn formatted(&mut self, name: &str, prefix: &str, width: usize) -> String {
        let n = self.next(name);
        format!("{}{:0width$}", prefix, n, width = width)
    }

    /// Current value without advancing (0 if never used)
    pub fn current(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }
}
