//! Frequency counting.
//!
//! A string-keyed counter: each `add` bumps the count of one exact symbol.
//! The table is built once per input and handed to the tree builder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// A distinct symbol and the number of times it was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// The symbol.
    pub symbol: Symbol,
    /// Occurrence count, at least 1 for entries produced by a table.
    pub count: u64,
}

impl FrequencyEntry {
    /// Create an entry.
    pub fn new(symbol: impl Into<Symbol>, count: u64) -> Self {
        Self {
            symbol: symbol.into(),
            count,
        }
    }
}

/// Counts occurrences of symbols.
///
/// Serializes as a sequence of [`FrequencyEntry`] so that one side can ship its
/// table and the other side can rebuild the same tree from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FrequencyEntry>", into = "Vec<FrequencyEntry>")]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `symbol`.
    ///
    /// A count saturates at `u64::MAX`.
    pub fn add(&mut self, symbol: impl AsRef<[u8]>) {
        let bytes = symbol.as_ref();
        match self.counts.get_mut(bytes) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                self.counts.insert(Symbol::from(bytes), 1);
            }
        }
    }

    /// Count for `symbol`, 0 if it was never added.
    pub fn get(&self, symbol: impl AsRef<[u8]>) -> u64 {
        self.counts.get(symbol.as_ref()).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of occurrences across all symbols.
    ///
    /// Fails with [`Error::FrequencyOverflow`] if the sum does not fit in a `u64`.
    pub fn total(&self) -> Result<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or(Error::FrequencyOverflow)
    }

    /// Iterate `(symbol, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, u64)> + '_ {
        self.counts.iter().map(|(s, &c)| (s, c))
    }

    /// Every distinct symbol with its count.
    ///
    /// Callers must not rely on the order of the returned entries.
    pub fn items(&self) -> Vec<FrequencyEntry> {
        self.iter()
            .map(|(symbol, count)| FrequencyEntry::new(symbol.clone(), count))
            .collect()
    }
}

impl<S: AsRef<[u8]>> Extend<S> for FrequencyTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for symbol in iter {
            self.add(symbol);
        }
    }
}

impl<S: AsRef<[u8]>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl TryFrom<Vec<FrequencyEntry>> for FrequencyTable {
    type Error = Error;

    /// Merge entries; repeated symbols have their counts summed and zero counts
    /// are dropped.
    fn try_from(entries: Vec<FrequencyEntry>) -> Result<Self> {
        let mut counts: BTreeMap<Symbol, u64> = BTreeMap::new();
        for entry in entries.into_iter().filter(|e| e.count > 0) {
            let count = counts.entry(entry.symbol).or_insert(0);
            *count = count
                .checked_add(entry.count)
                .ok_or(Error::FrequencyOverflow)?;
        }
        Ok(Self { counts })
    }
}

impl From<FrequencyTable> for Vec<FrequencyEntry> {
    fn from(table: FrequencyTable) -> Self {
        table
            .counts
            .into_iter()
            .map(|(symbol, count)| FrequencyEntry { symbol, count })
            .collect()
    }
}
