//! Identifier-keyed holdings index.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::CoverageEntry;

/// Serial identifier used as the index key. Usually an ISSN, but holdings
/// files put other identifiers into the same columns, so no checksum or
/// shape validation is applied; the value is trimmed and otherwise kept
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issn(String);

impl Issn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Issn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Issn {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Read-only mapping from identifier to the licenses covering it.
///
/// Built once by an [`IndexBuilder`] during ingestion; per-identifier
/// insertion order is preserved, which affects result ordering but not
/// semantics. Lookups on a finished index are safe to run from any number
/// of threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingsIndex {
    entries: HashMap<Issn, Vec<CoverageEntry>>,
}

impl HoldingsIndex {
    /// Licenses recorded for an identifier; empty for unknown identifiers.
    pub fn licenses(&self, issn: &Issn) -> &[CoverageEntry] {
        self.entries.get(issn).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of indexed licenses across all identifiers.
    pub fn license_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Issn> {
        self.entries.keys()
    }
}

/// Single-owner accumulator used while a holdings file is streamed. The
/// reader owns it for the duration of the parse loop and finalizes it into
/// an immutable [`HoldingsIndex`]; nothing else ever holds a reference.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: HashMap<Issn, Vec<CoverageEntry>>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, issn: Issn, entry: CoverageEntry) {
        self.entries.entry(issn).or_default().push(entry);
    }

    pub fn finish(self) -> HoldingsIndex {
        HoldingsIndex {
            entries: self.entries,
        }
    }
}
