//! Check command - validate a KBART file and aggregate row errors.
//!
//! Streams every row, counting records and per-kind error totals; the
//! result is a single JSON object on stdout. This is the intake sanity
//! check a vendor file gets before anyone relies on it.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use shelflife_holdings::IngestError;
use shelflife_kbart::{KbartReader, ReaderConfig};
use tracing::warn;

#[derive(Debug)]
pub struct CheckArgs {
    pub file: Option<PathBuf>,
    pub skip_header: bool,
    pub verbose: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let input = open_input(args.file.as_deref())?;
    let config = ReaderConfig {
        skip_first_row: args.skip_header,
        ..ReaderConfig::default()
    };
    let mut reader = KbartReader::with_config(input, config);

    let mut records: u64 = 0;
    // BTreeMap keeps the JSON key order stable across runs.
    let mut stats: BTreeMap<&'static str, u64> = BTreeMap::new();

    while let Some(result) = reader.read() {
        records += 1;
        match result {
            Ok(_) => {}
            Err(IngestError::Row(err)) => {
                if args.verbose {
                    warn!(line = err.line(), "{err}");
                }
                *stats.entry(err.kind().label()).or_insert(0) += 1;
            }
            Err(err) => return Err(err).context("reading holdings file"),
        }
    }

    stats.insert("records", records);
    println!("{}", serde_json::to_string(&stats)?);
    Ok(())
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
