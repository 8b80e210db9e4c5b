//! KBART holdings file reader.
//!
//! Streams tab-separated KBART rows into [`CoverageEntry`] values and an
//! identifier-keyed [`HoldingsIndex`](shelflife_holdings::HoldingsIndex).
//! Vendor files are messy, so every row error is classified and each kind
//! can independently be tolerated (row skipped, ingestion continues) or
//! treated as fatal (ingestion aborts, partial index returned).
//!
//! Rows are parsed through the `csv` crate configured tab-delimited and
//! non-quoting; blank lines are not records, and a final row without a
//! trailing newline is parsed like any other.

use std::io::{self, Read};

use csv::{Reader, ReaderBuilder, StringRecord};
use shelflife_holdings::{
    CoverageEntry, EmbargoError, HoldingsFile, HoldingsIndex, IndexBuilder, IngestAborted,
    IngestError, RowError,
};
use tracing::{debug, warn};

mod record;

pub use record::{KbartRecord, KBART_COLUMNS};

/// Reader configuration: header handling plus one tolerance flag per
/// recoverable row error kind. A tolerated offending row is skipped and
/// ingestion continues; a non-tolerated one aborts ingestion. All flags
/// default to off.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderConfig {
    /// Skip exactly one leading row. Headers are never auto-detected.
    pub skip_first_row: bool,
    pub tolerate_incomplete_lines: bool,
    pub tolerate_missing_identifiers: bool,
    /// Governs both embargo error kinds.
    pub tolerate_invalid_embargo: bool,
}

impl ReaderConfig {
    /// Whether ingestion survives this row error.
    pub fn tolerates(&self, err: &RowError) -> bool {
        match err {
            RowError::IncompleteLine { .. } => self.tolerate_incomplete_lines,
            RowError::MissingIdentifiers { .. } => self.tolerate_missing_identifiers,
            RowError::IncompleteEmbargo { .. } | RowError::InvalidEmbargo { .. } => {
                self.tolerate_invalid_embargo
            }
        }
    }
}

/// A validated KBART row: the raw record, the coverage entry built from it,
/// and the line it started on.
#[derive(Debug, Clone)]
pub struct Row {
    pub line: u64,
    pub record: KbartRecord,
    pub entry: CoverageEntry,
}

/// Streaming KBART reader over any byte source. The reader owns its source
/// exclusively for its lifetime; there is no concurrent ingestion.
pub struct KbartReader<R: Read> {
    inner: Reader<R>,
    config: ReaderConfig,
    header_pending: bool,
}

impl<R: Read> KbartReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(source: R, config: ReaderConfig) -> Self {
        let inner = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(source);
        Self {
            inner,
            config,
            header_pending: config.skip_first_row,
        }
    }

    /// Read and validate the next row. `None` at end of input. Tolerance
    /// flags do not apply here; every row error is surfaced to the caller.
    pub fn read(&mut self) -> Option<Result<Row, IngestError>> {
        let mut raw = StringRecord::new();
        loop {
            match self.inner.read_record(&mut raw) {
                Ok(false) => return None,
                Err(err) => return Some(Err(csv_error(err))),
                Ok(true) => {
                    let line = raw.position().map(|p| p.line()).unwrap_or(0);
                    if self.header_pending {
                        self.header_pending = false;
                        debug!(line, "skipping header row");
                        continue;
                    }
                    return Some(parse_row(line, &raw).map_err(IngestError::from));
                }
            }
        }
    }
}

impl<R: Read> HoldingsFile for KbartReader<R> {
    fn read_all(&mut self) -> Result<HoldingsIndex, IngestAborted> {
        let mut builder = IndexBuilder::new();
        while let Some(result) = self.read() {
            let row = match result {
                Ok(row) => row,
                Err(IngestError::Row(err)) if self.config.tolerates(&err) => {
                    warn!(line = err.line(), %err, "skipping row");
                    continue;
                }
                Err(error) => {
                    return Err(IngestAborted {
                        index: builder.finish(),
                        error,
                    });
                }
            };
            for issn in row.record.identifiers() {
                builder.insert(issn, row.entry.clone());
            }
        }
        Ok(builder.finish())
    }
}

fn parse_row(line: u64, raw: &StringRecord) -> Result<Row, RowError> {
    if raw.len() < KBART_COLUMNS {
        return Err(RowError::IncompleteLine {
            line,
            fields: raw.len(),
            expected: KBART_COLUMNS,
        });
    }
    let record = KbartRecord::from_fields(raw);
    if record.identifiers().is_empty() {
        return Err(RowError::MissingIdentifiers { line });
    }
    let entry = record.coverage_entry().map_err(|err| match err {
        EmbargoError::Incomplete(notation) => RowError::IncompleteEmbargo { line, notation },
        EmbargoError::Invalid(notation) => RowError::InvalidEmbargo { line, notation },
    })?;
    Ok(Row {
        line,
        record,
        entry,
    })
}

fn csv_error(err: csv::Error) -> IngestError {
    match err.into_kind() {
        csv::ErrorKind::Io(err) => IngestError::Io(err),
        kind => IngestError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{kind:?}"),
        )),
    }
}
