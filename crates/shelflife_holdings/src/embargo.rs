//! Embargo notation parsing.
//!
//! Vendors express moving walls as compact notations like `R10M` or `P1Y`:
//! a direction (`P` permits access up to the wall, `R` retains only what is
//! behind it), a count, and a unit in days, months or years. The notation
//! always describes an offset subtracted from "now"; month and year convert
//! at 30 and 365 days.

use std::sync::LazyLock;

use chrono::Duration;
use regex::Regex;
use thiserror::Error;

static NOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([PR])(\d+)([DMY])$").unwrap());

/// Parse failures for embargo notations. These are plain values; callers
/// decide whether a bad notation aborts anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbargoError {
    /// The notation does not have the `<direction><count><unit>` shape.
    #[error("incomplete embargo: {0:?}")]
    Incomplete(String),

    /// The notation matched but its count or unit is unusable.
    #[error("invalid embargo: {0:?}")]
    Invalid(String),
}

/// A parsed embargo: a zero-or-negative offset from "now" plus a direction
/// flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Embargo {
    /// The moving wall sits at `now + offset`.
    pub offset: Duration,
    /// Set for `R` notations: access to material older than the wall is
    /// denied as well.
    pub disallow_earlier: bool,
}

impl Default for Embargo {
    fn default() -> Self {
        Self {
            offset: Duration::zero(),
            disallow_earlier: false,
        }
    }
}

impl Embargo {
    /// Parse a notation like `R10M`. Whitespace is trimmed; an empty
    /// notation is a zero embargo, not an error.
    pub fn parse(notation: &str) -> Result<Self, EmbargoError> {
        let notation = notation.trim();
        if notation.is_empty() {
            return Ok(Self::default());
        }
        let caps = NOTATION
            .captures(notation)
            .ok_or_else(|| EmbargoError::Incomplete(notation.to_string()))?;
        let count: i64 = caps[2]
            .parse()
            .map_err(|_| EmbargoError::Invalid(notation.to_string()))?;
        let unit_days = match &caps[3] {
            "D" => 1,
            "M" => 30,
            "Y" => 365,
            _ => return Err(EmbargoError::Invalid(notation.to_string())),
        };
        let hours = count
            .checked_mul(unit_days * 24)
            .ok_or_else(|| EmbargoError::Invalid(notation.to_string()))?;
        let offset = Duration::try_hours(-hours)
            .ok_or_else(|| EmbargoError::Invalid(notation.to_string()))?;
        Ok(Self {
            offset,
            disallow_earlier: &caps[1] == "R",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directions_and_units() {
        let cases = [
            ("R1D", Duration::hours(-24), true),
            ("R10M", Duration::hours(-7200), true),
            ("P1Y", Duration::hours(-8760), false),
            ("P0D", Duration::zero(), false),
        ];
        for (notation, offset, disallow_earlier) in cases {
            let embargo = Embargo::parse(notation).unwrap();
            assert_eq!(embargo.offset, offset, "offset for {notation}");
            assert_eq!(
                embargo.disallow_earlier, disallow_earlier,
                "flag for {notation}"
            );
        }
    }

    #[test]
    fn empty_notation_is_zero_embargo() {
        for notation in ["", "   ", "\t"] {
            let embargo = Embargo::parse(notation).unwrap();
            assert_eq!(embargo.offset, Duration::zero());
            assert!(!embargo.disallow_earlier);
        }
    }

    #[test]
    fn malformed_notations_are_incomplete() {
        for notation in ["1", "R1", "10M", "?10M", "RD", "P1W", "R1Mx"] {
            match Embargo::parse(notation) {
                Err(EmbargoError::Incomplete(got)) => assert_eq!(got, notation),
                other => panic!("expected Incomplete for {notation}, got {other:?}"),
            }
        }
    }

    #[test]
    fn overflowing_count_is_invalid() {
        let notation = "R99999999999999999999Y";
        assert!(matches!(
            Embargo::parse(notation),
            Err(EmbargoError::Invalid(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let embargo = Embargo::parse("  R1D \n").unwrap();
        assert_eq!(embargo.offset, Duration::hours(-24));
        assert!(embargo.disallow_earlier);
    }
}
