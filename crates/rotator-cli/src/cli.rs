//! Command-line definition.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Upper bound for `--simulate`; every step keeps a copy of the held set.
pub const MAX_SIMULATED_RUNS: u64 = 100_000;

/// Move a file into a rotation of backup archives.
///
/// Example: `archive-rotator -v -n 5 /path/to/foo/mydump.tgz`
#[derive(Debug, Parser)]
#[command(name = "archive-rotator")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("algorithm").args(["simple", "hanoi", "tiered"])))]
pub struct Cli {
    /// Path of input file to rotate
    #[arg(required_unless_present = "simulate")]
    pub path: Option<PathBuf>,

    /// Max number of files in the rotation; repeat once per tier with --tiered
    #[arg(short = 'n', long = "num", value_name = "N", allow_negative_numbers = true)]
    pub num: Vec<i64>,

    /// Print info messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Look for and preserve the named file extension
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Put the rotated archive in this directory instead of next to the input
    #[arg(long, value_name = "DIR")]
    pub destination_dir: Option<PathBuf>,

    /// If the input file is missing, log and exit normally rather than exiting with an error
    #[arg(long)]
    pub ignore_missing: bool,

    /// Use the first-in-first-out rotation pattern (default)
    #[arg(long)]
    pub simple: bool,

    /// Use the Tower of Hanoi rotation pattern
    #[arg(long)]
    pub hanoi: bool,

    /// Use the tiered rotation pattern
    #[arg(long)]
    pub tiered: bool,

    /// Report what would be moved and removed without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Print results as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Read defaults from a TOML file; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the slot schedule of RUNS rotations instead of rotating a file
    #[arg(
        long,
        value_name = "RUNS",
        value_parser = clap::value_parser!(u64).range(..=MAX_SIMULATED_RUNS),
        conflicts_with_all = ["dry_run", "list"]
    )]
    pub simulate: Option<u64>,

    /// List the current rotation set instead of rotating
    #[arg(long, conflicts_with = "dry_run")]
    pub list: bool,
}
