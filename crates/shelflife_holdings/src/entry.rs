//! Coverage entries and the decision logic.
//!
//! A [`CoverageEntry`] is one license's coverage range (begin/end
//! signatures) plus its embargo. The two checks are independent:
//! [`CoverageEntry::covers`] looks at the static range only, and
//! [`CoverageEntry::time_restricted`] evaluates the moving wall. Callers
//! report both verdicts side by side.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embargo::Embargo;
use crate::signature::Signature;

/// Verdict of a static coverage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    /// The query lies inside the entry's range.
    Covered,
    /// The date axis could not be evaluated because the query or both
    /// bounds carry no date. Policy maps this to "no restriction".
    Indeterminate,
    /// The query predates the coverage interval.
    BeforeRange,
    /// The query postdates the coverage interval.
    AfterRange,
}

impl Coverage {
    /// Whether this verdict permits access.
    pub fn permits(self) -> bool {
        matches!(self, Coverage::Covered | Coverage::Indeterminate)
    }
}

/// Returned when the moving wall denies access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("moving wall applies")]
pub struct MovingWall;

/// One license's coverage range plus its embargo. Any subset of fields of
/// either bound may be populated, independently of the other bound.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageEntry {
    pub begin: Signature,
    pub end: Signature,
    /// Zero or negative; see [`Embargo`].
    #[serde(with = "duration_seconds")]
    pub embargo: Duration,
    pub embargo_disallow_earlier: bool,
}

impl Default for CoverageEntry {
    fn default() -> Self {
        Self {
            begin: Signature::default(),
            end: Signature::default(),
            embargo: Duration::zero(),
            embargo_disallow_earlier: false,
        }
    }
}

impl CoverageEntry {
    pub fn new(begin: Signature, end: Signature, embargo: Embargo) -> Self {
        Self {
            begin,
            end,
            embargo: embargo.offset,
            embargo_disallow_earlier: embargo.disallow_earlier,
        }
    }

    /// Classify a query against this entry's range.
    ///
    /// Three checks run in order date, volume, issue, stopping at the first
    /// blocking result. The date axis is the primary one: when the query or
    /// both bounds carry no date it is indeterminate, the secondary axes
    /// are still consulted, and if they pass the verdict is
    /// [`Coverage::Indeterminate`]. Volume and issue are only enforced when
    /// the query and the corresponding bound both carry a value; real
    /// holdings rows rarely specify more than one axis reliably.
    pub fn covers(&self, query: &Signature) -> Coverage {
        let date_known =
            !query.date.is_empty() && !(self.begin.date.is_empty() && self.end.date.is_empty());
        if date_known {
            if !self.begin.date.is_empty() && query.date < self.begin.date {
                return Coverage::BeforeRange;
            }
            if !self.end.date.is_empty() && query.date > self.end.date {
                return Coverage::AfterRange;
            }
        }

        if !query.volume.is_empty() {
            let volume = query.volume_int();
            if !self.begin.volume.is_empty() && volume < self.begin.volume_int() {
                return Coverage::BeforeRange;
            }
            if !self.end.volume.is_empty() && volume > self.end.volume_int() {
                return Coverage::AfterRange;
            }
        }

        if !query.issue.is_empty() {
            let issue = query.issue_int();
            if !self.begin.issue.is_empty() && issue < self.begin.issue_int() {
                return Coverage::BeforeRange;
            }
            if !self.end.issue.is_empty() && issue > self.end.issue_int() {
                return Coverage::AfterRange;
            }
        }

        if date_known {
            Coverage::Covered
        } else {
            Coverage::Indeterminate
        }
    }

    /// Evaluate the moving wall. `t` is the record's timestamp, `now` the
    /// evaluation time; the wall sits at `now + embargo`.
    ///
    /// Records newer than the wall are restricted regardless of the flag.
    /// When `embargo_disallow_earlier` is set, records older than the wall
    /// are restricted as well, so both sides can trigger under the flag.
    /// The two-sided rule is deliberate; see DESIGN.md before changing it.
    pub fn time_restricted(&self, t: DateTime<Utc>, now: DateTime<Utc>) -> Option<MovingWall> {
        let wall = now + self.embargo;
        if self.embargo_disallow_earlier && t < wall {
            return Some(MovingWall);
        }
        if t > wall {
            return Some(MovingWall);
        }
        None
    }
}

mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.num_seconds().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = i64::deserialize(deserializer)?;
        Duration::try_seconds(seconds)
            .ok_or_else(|| serde::de::Error::custom("embargo offset out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(begin: Signature, end: Signature) -> CoverageEntry {
        CoverageEntry::new(begin, end, Embargo::default())
    }

    fn sig(date: &str, volume: &str, issue: &str) -> Signature {
        Signature::new(date, volume, issue)
    }

    #[test]
    fn covers_classifies_queries() {
        let cases: &[(&str, CoverageEntry, Signature, Coverage)] = &[
            (
                "nothing defined, assume coverage",
                entry(sig("", "", ""), sig("", "", "")),
                sig("", "", ""),
                Coverage::Indeterminate,
            ),
            (
                "record without date passes, coverage not determinable",
                entry(sig("2010", "", ""), sig("2011", "", "")),
                sig("", "", ""),
                Coverage::Indeterminate,
            ),
            (
                "open end, query on begin",
                entry(sig("2011", "", ""), sig("", "", "")),
                sig("2011", "", ""),
                Coverage::Covered,
            ),
            (
                "open begin, query on end",
                entry(sig("", "", ""), sig("2011", "", "")),
                sig("2011", "", ""),
                Coverage::Covered,
            ),
            (
                "open end, query after begin",
                entry(sig("2011", "", ""), sig("", "", "")),
                sig("2012", "", ""),
                Coverage::Covered,
            ),
            (
                "open begin, query after end",
                entry(sig("", "", ""), sig("2011", "", "")),
                sig("2012", "", ""),
                Coverage::AfterRange,
            ),
            (
                "record too late",
                entry(sig("2010", "", ""), sig("2011", "", "")),
                sig("2012", "", ""),
                Coverage::AfterRange,
            ),
            (
                "record too early",
                entry(sig("2010", "", ""), sig("2011", "", "")),
                sig("2009", "", ""),
                Coverage::BeforeRange,
            ),
            (
                "record inside range",
                entry(sig("2010", "", ""), sig("2011", "", "")),
                sig("2010", "", ""),
                Coverage::Covered,
            ),
            (
                "bounds without dates pass",
                entry(sig("", "1", ""), sig("", "2", "")),
                sig("2010", "", ""),
                Coverage::Indeterminate,
            ),
            (
                "date matches, record has no volume",
                entry(sig("2009", "1", ""), sig("2011", "2", "")),
                sig("2010", "", ""),
                Coverage::Covered,
            ),
            (
                "date and volume covered",
                entry(sig("2009", "1", ""), sig("2011", "2", "")),
                sig("2010", "1", ""),
                Coverage::Covered,
            ),
            (
                "date covered, volume too late",
                entry(sig("2009", "1", ""), sig("2011", "2", "")),
                sig("2010", "3", ""),
                Coverage::AfterRange,
            ),
            (
                "date covered, volume too early",
                entry(sig("2009", "10", ""), sig("2011", "12", "")),
                sig("2009", "9", ""),
                Coverage::BeforeRange,
            ),
            (
                "full signature covered",
                entry(sig("2009", "10", "123"), sig("2011", "12", "234")),
                sig("2009", "11", "124"),
                Coverage::Covered,
            ),
            (
                "issue too early",
                entry(sig("2009", "", "10"), sig("2011", "", "12")),
                sig("2010", "", "9"),
                Coverage::BeforeRange,
            ),
        ];

        for (description, entry, query, want) in cases {
            assert_eq!(entry.covers(query), *want, "{description}");
        }
    }

    #[test]
    fn indeterminate_date_still_enforces_secondary_axes() {
        let entry = entry(sig("", "10", ""), sig("", "12", ""));
        assert_eq!(entry.covers(&sig("", "9", "")), Coverage::BeforeRange);
        assert_eq!(entry.covers(&sig("", "13", "")), Coverage::AfterRange);
        assert_eq!(entry.covers(&sig("", "11", "")), Coverage::Indeterminate);
    }

    #[test]
    fn full_date_strings_compare_against_years() {
        // Zero-padded ISO dates sort lexically against bare years.
        let entry = entry(sig("2009", "", ""), sig("2011", "", ""));
        assert_eq!(entry.covers(&sig("2010-06-15", "", "")), Coverage::Covered);
        assert_eq!(
            entry.covers(&sig("2008-12-31", "", "")),
            Coverage::BeforeRange
        );
    }

    #[test]
    fn date_verdict_is_monotonic() {
        let entry = entry(sig("2009", "", ""), sig("2011", "", ""));
        let mut seen_before_range = false;
        for date in ["2012", "2011", "2010", "2009", "2008", "2007", "2006"] {
            let verdict = entry.covers(&sig(date, "", ""));
            if seen_before_range {
                assert_eq!(verdict, Coverage::BeforeRange, "no transition back at {date}");
            }
            if verdict == Coverage::BeforeRange {
                seen_before_range = true;
            }
        }
        assert!(seen_before_range);
    }

    #[test]
    fn wall_restricts_recent_records() {
        let now = Utc::now();
        let entry = CoverageEntry::new(
            sig("", "", ""),
            sig("", "", ""),
            Embargo::parse("P6M").unwrap(),
        );
        // Inside the embargo window.
        assert_eq!(
            entry.time_restricted(now - Duration::days(30), now),
            Some(MovingWall)
        );
        // Well behind the wall.
        assert_eq!(entry.time_restricted(now - Duration::days(400), now), None);
    }

    #[test]
    fn disallow_earlier_restricts_both_sides() {
        let now = Utc::now();
        let entry = CoverageEntry::new(
            sig("", "", ""),
            sig("", "", ""),
            Embargo::parse("R6M").unwrap(),
        );
        let wall = now + entry.embargo;
        assert_eq!(
            entry.time_restricted(wall - Duration::days(1), now),
            Some(MovingWall)
        );
        assert_eq!(
            entry.time_restricted(wall + Duration::days(1), now),
            Some(MovingWall)
        );
        assert_eq!(entry.time_restricted(wall, now), None);
    }

    #[test]
    fn zero_embargo_only_restricts_the_future() {
        let now = Utc::now();
        let entry = entry(sig("2009", "", ""), sig("2011", "", ""));
        assert_eq!(entry.time_restricted(now - Duration::days(365), now), None);
        assert_eq!(entry.time_restricted(now, now), None);
        assert_eq!(
            entry.time_restricted(now + Duration::days(1), now),
            Some(MovingWall)
        );
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = CoverageEntry::new(
            sig("2009", "10", ""),
            sig("2011", "12", ""),
            Embargo::parse("R10M").unwrap(),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: CoverageEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
