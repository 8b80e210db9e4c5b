//! Coverage data model and decision engine for electronic holdings.
//!
//! A library licenses electronic access to ranges of a serial's issues.
//! Shelflife answers, for a concrete issue (identified by ISSN and
//! described by a date/volume/issue triple), whether a license covers it
//! and whether a moving-wall embargo currently restricts it. This crate
//! holds the decision core; format readers and the CLI sit on top.
//!
//! # Modules
//!
//! - [`signature`]: the (date, volume, issue) triple of a query or a
//!   coverage boundary
//! - [`embargo`]: moving-wall notation parsing (`R10M`, `P1Y`, ...)
//! - [`entry`]: coverage entries plus the range and moving-wall checks
//! - [`index`]: the identifier-to-licenses index and its build-time
//!   accumulator
//! - [`error`]: the classified row-level error taxonomy for ingestion
//! - [`format`]: the capability trait a holdings file reader implements

pub mod embargo;
pub mod entry;
pub mod error;
pub mod format;
pub mod index;
pub mod signature;

pub use embargo::{Embargo, EmbargoError};
pub use entry::{Coverage, CoverageEntry, MovingWall};
pub use error::{IngestAborted, IngestError, RowError, RowErrorKind};
pub use format::HoldingsFile;
pub use index::{HoldingsIndex, IndexBuilder, Issn};
pub use signature::Signature;
