//! Query and boundary signatures.

use serde::{Deserialize, Serialize};

/// A bag of information about a serial issue from which coverage can be
/// determined: a date, a volume and an issue. Every field is optional; an
/// empty string means unknown.
///
/// Dates are compared as strings, which is valid for the accepted formats
/// (a bare year like `2009` or a full date like `2009-01-02`) because both
/// are left-padded and zero-padded. Volumes and issues should be integers,
/// but holdings files frequently carry values like `Vol. 29` or `29b`, so
/// comparisons go through a best-effort extraction instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub date: String,
    pub volume: String,
    pub issue: String,
}

impl Signature {
    pub fn new(
        date: impl Into<String>,
        volume: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            volume: volume.into(),
            issue: issue.into(),
        }
    }

    /// Best-effort volume number; 0 when no digits are present.
    pub fn volume_int(&self) -> i64 {
        extract_int(&self.volume)
    }

    /// Best-effort issue number; 0 when no digits are present.
    pub fn issue_int(&self) -> i64 {
        extract_int(&self.issue)
    }
}

/// Extract an integer from a value that should contain a number. A
/// full-string parse is tried first, then the first contiguous digit run.
/// Values without any digit extract to 0, which makes "no number found"
/// indistinguishable from an explicit zero; that is a known limitation of
/// the comparison model, not something to paper over here.
fn extract_int(value: &str) -> i64 {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return n;
    }
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
