//! The 23-column KBART record.

use csv::StringRecord;
use shelflife_holdings::{CoverageEntry, Embargo, EmbargoError, Issn, Signature};

/// Number of columns a KBART row must carry.
pub const KBART_COLUMNS: usize = 23;

/// One row of a KBART (Knowledge Bases And Related Tools) holdings file,
/// every column named. The coverage engine only consumes the identifier,
/// date/volume/issue and embargo columns; the rest ride along for boundary
/// collaborators that want titles, URLs or interlibrary terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KbartRecord {
    pub publication_title: String,
    pub print_identifier: String,
    pub online_identifier: String,
    pub first_issue_date: String,
    pub first_volume: String,
    pub first_issue: String,
    pub last_issue_date: String,
    pub last_volume: String,
    pub last_issue: String,
    pub title_url: String,
    pub first_author: String,
    pub title_id: String,
    pub embargo_info: String,
    pub coverage_depth: String,
    pub coverage_notes: String,
    pub publisher_name: String,
    pub anchor: String,
    pub il_relevance: String,
    pub il_nationwide: String,
    pub il_electronic_transmission: String,
    pub il_comment: String,
    pub all_issns: String,
    pub zdb_id: String,
}

impl KbartRecord {
    pub(crate) fn from_fields(record: &StringRecord) -> Self {
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        Self {
            publication_title: field(0),
            print_identifier: field(1),
            online_identifier: field(2),
            first_issue_date: field(3),
            first_volume: field(4),
            first_issue: field(5),
            last_issue_date: field(6),
            last_volume: field(7),
            last_issue: field(8),
            title_url: field(9),
            first_author: field(10),
            title_id: field(11),
            embargo_info: field(12),
            coverage_depth: field(13),
            coverage_notes: field(14),
            publisher_name: field(15),
            anchor: field(16),
            il_relevance: field(17),
            il_nationwide: field(18),
            il_electronic_transmission: field(19),
            il_comment: field(20),
            all_issns: field(21),
            zdb_id: field(22),
        }
    }

    /// The identifiers this record is indexed under: the print and online
    /// identifier columns, trimmed, empty ones dropped. A row carrying two
    /// distinct identifiers is indexed twice against the same entry.
    pub fn identifiers(&self) -> Vec<Issn> {
        [&self.print_identifier, &self.online_identifier]
            .into_iter()
            .map(|value| Issn::new(value.as_str()))
            .filter(|issn| !issn.is_empty())
            .collect()
    }

    /// Parse the embargo column.
    pub fn embargo(&self) -> Result<Embargo, EmbargoError> {
        Embargo::parse(&self.embargo_info)
    }

    /// Build the coverage entry described by this record.
    pub fn coverage_entry(&self) -> Result<CoverageEntry, EmbargoError> {
        let embargo = self.embargo()?;
        Ok(CoverageEntry::new(
            Signature::new(
                self.first_issue_date.as_str(),
                self.first_volume.as_str(),
                self.first_issue.as_str(),
            ),
            Signature::new(
                self.last_issue_date.as_str(),
                self.last_volume.as_str(),
                self.last_issue.as_str(),
            ),
            embargo,
        ))
    }
}
