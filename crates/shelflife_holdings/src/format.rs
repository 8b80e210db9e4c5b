//! Capability seam for holdings file formats.

use crate::error::IngestAborted;
use crate::index::HoldingsIndex;

/// A tabular holdings format that can be ingested into an index.
///
/// One implementation exists per supported format; the boundary layer picks
/// the implementation explicitly (a format flag), not through open-ended
/// dynamic dispatch over file contents.
pub trait HoldingsFile {
    /// Drain the underlying stream into an index. A non-tolerated row error
    /// aborts ingestion and hands back the partial index alongside the
    /// error.
    fn read_all(&mut self) -> Result<HoldingsIndex, IngestAborted>;
}
