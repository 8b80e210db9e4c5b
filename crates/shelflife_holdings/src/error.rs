//! Row-level error taxonomy for holdings ingestion.
//!
//! Ingestion errors are classified, not generic: each kind is independently
//! recoverable under reader configuration, and each carries its line number
//! so boundary collaborators can log individual rows or aggregate counts
//! per kind.

use std::io;

use thiserror::Error;

use crate::index::HoldingsIndex;

/// A classified per-row ingestion error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The row has fewer columns than the format requires.
    #[error("line {line}: incomplete line ({fields} of {expected} columns)")]
    IncompleteLine {
        line: u64,
        fields: usize,
        expected: usize,
    },

    /// Both identifier columns are empty after trimming.
    #[error("line {line}: missing identifiers")]
    MissingIdentifiers { line: u64 },

    /// The embargo notation does not have the expected shape.
    #[error("line {line}: incomplete embargo {notation:?}")]
    IncompleteEmbargo { line: u64, notation: String },

    /// The embargo notation matched but is unusable.
    #[error("line {line}: invalid embargo {notation:?}")]
    InvalidEmbargo { line: u64, notation: String },
}

impl RowError {
    /// Line the offending row started on (1-based).
    pub fn line(&self) -> u64 {
        match self {
            RowError::IncompleteLine { line, .. }
            | RowError::MissingIdentifiers { line }
            | RowError::IncompleteEmbargo { line, .. }
            | RowError::InvalidEmbargo { line, .. } => *line,
        }
    }

    pub fn kind(&self) -> RowErrorKind {
        match self {
            RowError::IncompleteLine { .. } => RowErrorKind::IncompleteLine,
            RowError::MissingIdentifiers { .. } => RowErrorKind::MissingIdentifiers,
            RowError::IncompleteEmbargo { .. } => RowErrorKind::IncompleteEmbargo,
            RowError::InvalidEmbargo { .. } => RowErrorKind::InvalidEmbargo,
        }
    }
}

/// Row error kind without its row context, for per-kind aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowErrorKind {
    IncompleteLine,
    MissingIdentifiers,
    IncompleteEmbargo,
    InvalidEmbargo,
}

impl RowErrorKind {
    /// Stable label used as an aggregation key in reports.
    pub const fn label(self) -> &'static str {
        match self {
            RowErrorKind::IncompleteLine => "incomplete line",
            RowErrorKind::MissingIdentifiers => "missing identifiers",
            RowErrorKind::IncompleteEmbargo => "incomplete embargo",
            RowErrorKind::InvalidEmbargo => "invalid embargo",
        }
    }
}

/// Ingestion failure: a classified row error or an I/O fault in the
/// underlying stream.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Row(#[from] RowError),

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// Ingestion stopped on a non-tolerated error.
///
/// Ingestion is not transactional: the index accumulated before the
/// offending row rides along and remains usable.
#[derive(Debug, Error)]
#[error("ingestion aborted: {error}")]
pub struct IngestAborted {
    pub index: HoldingsIndex,
    pub error: IngestError,
}
