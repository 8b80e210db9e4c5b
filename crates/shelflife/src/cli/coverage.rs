//! Coverage command - answer whether a specific issue is accessible.
//!
//! Ingests the holdings file, looks up every license for the ISSN, and
//! reports two independent verdicts per license: the static coverage check
//! and the moving wall.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use shelflife_holdings::{
    Coverage, CoverageEntry, HoldingsFile, HoldingsIndex, Issn, Signature,
};
use shelflife_kbart::{KbartReader, ReaderConfig};
use tracing::debug;

/// Supported holdings file formats. Exactly one reader exists per format
/// and the flag picks it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Kbart,
}

#[derive(Debug)]
pub struct CoverageArgs {
    pub issn: String,
    pub date: String,
    pub volume: String,
    pub issue: String,
    pub file: PathBuf,
    pub format: Format,
    pub skip_header: bool,
    pub tolerate_incomplete_lines: bool,
    pub tolerate_missing_identifiers: bool,
    pub tolerate_invalid_embargo: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CoverageReport<'a> {
    issn: &'a str,
    query: &'a Signature,
    licenses: Vec<LicenseVerdict<'a>>,
}

#[derive(Debug, Serialize)]
struct LicenseVerdict<'a> {
    index: usize,
    entry: &'a CoverageEntry,
    coverage: Coverage,
    moving_wall: bool,
    permitted: bool,
}

pub fn run(args: CoverageArgs) -> Result<()> {
    let t = parse_query_date(&args.date)?;
    let index = load_index(&args)?;

    let issn = Issn::new(args.issn.as_str());
    let query = Signature::new(args.date.as_str(), args.volume.as_str(), args.issue.as_str());
    let now = Utc::now();

    let verdicts: Vec<LicenseVerdict> = index
        .licenses(&issn)
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            debug!(index = i, ?entry, "evaluating license");
            let coverage = entry.covers(&query);
            let moving_wall = entry.time_restricted(t, now).is_some();
            LicenseVerdict {
                index: i,
                entry,
                coverage,
                moving_wall,
                permitted: coverage.permits() && !moving_wall,
            }
        })
        .collect();

    if args.json {
        let report = CoverageReport {
            issn: issn.as_str(),
            query: &query,
            licenses: verdicts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verdicts.is_empty() {
        println!("no holdings for {issn}");
        return Ok(());
    }
    for verdict in &verdicts {
        if verdict.permitted {
            println!("{}\tOK\tno restrictions", verdict.index);
            continue;
        }
        if !verdict.coverage.permits() {
            println!(
                "{}\tNO\tnot covered: {}",
                verdict.index,
                describe(verdict.coverage)
            );
        }
        if verdict.moving_wall {
            println!("{}\tNO\tmoving wall applies", verdict.index);
        }
    }
    Ok(())
}

fn load_index(args: &CoverageArgs) -> Result<HoldingsIndex> {
    let file = File::open(&args.file)
        .with_context(|| format!("opening {}", args.file.display()))?;
    let config = ReaderConfig {
        skip_first_row: args.skip_header,
        tolerate_incomplete_lines: args.tolerate_incomplete_lines,
        tolerate_missing_identifiers: args.tolerate_missing_identifiers,
        tolerate_invalid_embargo: args.tolerate_invalid_embargo,
    };
    let mut reader: Box<dyn HoldingsFile> = match args.format {
        Format::Kbart => Box::new(KbartReader::with_config(BufReader::new(file), config)),
    };
    reader.read_all().context("ingesting holdings file")
}

/// Parse the query date. A bare year resolves to January 1 of that year,
/// mirroring how year-only coverage bounds are read.
fn parse_query_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    let date = if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        date
    } else if let Ok(year) = raw.parse::<i32>() {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .with_context(|| format!("year out of range: {raw}"))?
    } else {
        bail!("could not parse date {raw:?}; expected YYYY-MM-DD or YYYY");
    };
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

fn describe(coverage: Coverage) -> &'static str {
    match coverage {
        Coverage::Covered => "covered",
        Coverage::Indeterminate => "not determinable, assumed covered",
        Coverage::BeforeRange => "before coverage interval",
        Coverage::AfterRange => "after coverage interval",
    }
}
