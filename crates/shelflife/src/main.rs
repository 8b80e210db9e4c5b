//! Shelflife launcher.
//!
//! Standalone commands over KBART holdings files: `check` validates a file
//! and reports per-kind row error counts, `coverage` answers whether a
//! specific serial issue is accessible under the holdings.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::check::CheckArgs;
use cli::coverage::{CoverageArgs, Format};

#[derive(Parser, Debug)]
#[command(name = "shelflife", about = "Coverage checks against KBART holdings files")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a KBART file and report row error counts
    Check {
        /// Holdings file; stdin when omitted
        file: Option<PathBuf>,

        /// Skip the header row
        #[arg(long)]
        skip_header: bool,
    },
    /// Check whether an issue is covered and outside the moving wall
    Coverage {
        /// Record ISSN
        #[arg(long)]
        issn: String,

        /// Record date (YYYY-MM-DD or YYYY)
        #[arg(long)]
        date: String,

        /// Record volume
        #[arg(long, default_value = "")]
        volume: String,

        /// Record issue
        #[arg(long, default_value = "")]
        issue: String,

        /// Holdings file
        #[arg(long)]
        file: PathBuf,

        /// Holdings file format
        #[arg(long, value_enum, default_value_t = Format::Kbart)]
        format: Format,

        /// Skip the header row
        #[arg(long)]
        skip_header: bool,

        /// Skip rows with fewer columns than the format requires
        #[arg(long)]
        tolerate_incomplete_lines: bool,

        /// Skip rows with both identifier columns empty
        #[arg(long)]
        tolerate_missing_identifiers: bool,

        /// Skip rows whose embargo notation does not parse
        #[arg(long)]
        tolerate_invalid_embargo: bool,

        /// Emit a JSON report instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { file, skip_header } => cli::check::run(CheckArgs {
            file,
            skip_header,
            verbose: cli.verbose,
        }),
        Commands::Coverage {
            issn,
            date,
            volume,
            issue,
            file,
            format,
            skip_header,
            tolerate_incomplete_lines,
            tolerate_missing_identifiers,
            tolerate_invalid_embargo,
            json,
        } => cli::coverage::run(CoverageArgs {
            issn,
            date,
            volume,
            issue,
            file,
            format,
            skip_header,
            tolerate_incomplete_lines,
            tolerate_missing_identifiers,
            tolerate_invalid_embargo,
            json,
        }),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "shelflife=debug,shelflife_kbart=debug,shelflife_holdings=debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
