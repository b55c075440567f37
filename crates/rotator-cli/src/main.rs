//! archive-rotator: move a file into a rotation of timestamped backups.
//!
//! Modes: rotate (default), `--dry-run`, `--list`, `--simulate RUNS`

mod cli;
mod output;
mod settings;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use rotator_core::{simulate, RotationState};
use rotator_vault::{current_set, rotate, ArchivePaths, RotateOptions};

use crate::cli::Cli;
use crate::output::{format_held, format_outcome, format_simulation, OutputFormat};
use crate::settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::INFO } else { Level::WARN })
        .with_target(false)
        .without_time()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("archive-rotator: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::resolve(cli)?;
    let format = OutputFormat::from_flag(cli.json);

    let rendered = if let Some(runs) = cli.simulate {
        tracing::info!("Simulating {runs} rotations with {}", settings.algorithm);
        let steps = simulate(&settings.algorithm, RotationState::new(), runs)?;
        format_simulation(&steps, format)?
    } else {
        let path = cli
            .path
            .as_deref()
            .context("an input path is required")?;
        let paths = ArchivePaths::new(path, &settings.ext, settings.destination_dir.as_deref())?;

        if cli.list {
            format_held(&current_set(&settings.algorithm, &paths)?, format)?
        } else {
            let options = RotateOptions {
                ignore_missing: settings.ignore_missing,
                dry_run: cli.dry_run,
            };
            let outcome = rotate(&settings.algorithm, &paths, options)?;
            format_outcome(outcome.as_ref(), format)?
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
