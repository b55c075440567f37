//! Move a file into its rotation and evict displaced archives.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use rotator_core::{AlgorithmConfig, Result, RotationAlgorithm, RotationDecision, RotatorError};

use crate::paths::ArchivePaths;
use crate::scan::{current_set, rotation_state, scan};

const LAYOUT_SHOWN: usize = 16;

/// Switches for a single rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotateOptions {
    /// Treat a missing input file as "nothing to do" instead of an error.
    pub ignore_missing: bool,
    /// Compute and report the outcome without touching any file.
    pub dry_run: bool,
}

/// What a rotation did (or, in a dry run, would do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationOutcome {
    pub decision: RotationDecision,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub removed: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Rotate the input file of `paths` into its family, stamped with the local time.
///
/// Returns `Ok(None)` when the input is missing and
/// [`RotateOptions::ignore_missing`] is set.
///
/// # Errors
///
/// See [`rotate_at`].
pub fn rotate(
    config: &AlgorithmConfig,
    paths: &ArchivePaths,
    options: RotateOptions,
) -> Result<Option<RotationOutcome>> {
    rotate_at(config, paths, options, Local::now().naive_local())
}

/// Rotate the input file of `paths` into its family, stamped with `now`.
///
/// The new archive is moved into place before any eviction.
///
/// # Errors
///
/// - [`RotatorError::InvalidPath`] if the input is a directory or the
///   destination name is already taken
/// - [`RotatorError::InputMissing`] if the input does not exist and
///   missing input is not ignored
/// - [`RotatorError::GenerationOverflow`] if the family is exhausted
/// - [`RotatorError::Io`] if scanning, moving or removing fails
pub fn rotate_at(
    config: &AlgorithmConfig,
    paths: &ArchivePaths,
    options: RotateOptions,
    now: NaiveDateTime,
) -> Result<Option<RotationOutcome>> {
    let source = paths.input_path();
    if source.is_dir() {
        return Err(RotatorError::InvalidPath(format!(
            "The specified path ({}) is a directory, but must be a file.",
            source.display()
        )));
    }
    if !source.is_file() {
        if options.ignore_missing {
            tracing::info!("Specified file ({}) not found; exiting.", source.display());
            return Ok(None);
        }
        return Err(RotatorError::InputMissing(source));
    }

    tracing::info!("Using {}", config);

    let archives = scan(paths)?;
    let decision = config.decide(&rotation_state(&archives))?;
    tracing::info!(
        "New file: rotation_id={}, rotation_slot={}",
        decision.generation,
        decision.slot
    );

    let destination = paths.output_path(decision.generation, now);
    if destination.exists() {
        return Err(RotatorError::InvalidPath(format!(
            "refusing to overwrite existing archive {}",
            destination.display()
        )));
    }
    let removed: Vec<PathBuf> = archives
        .iter()
        .filter(|archive| decision.evict.contains(&archive.generation))
        .map(|archive| archive.path.clone())
        .collect();

    let outcome = RotationOutcome {
        decision,
        source,
        destination,
        removed,
        dry_run: options.dry_run,
    };

    if options.dry_run {
        tracing::info!(
            "DRY RUN: Would move {} to {}",
            outcome.source.display(),
            outcome.destination.display()
        );
        for path in &outcome.removed {
            tracing::info!("DRY RUN: Would remove {}", path.display());
        }
        return Ok(Some(outcome));
    }

    move_file(&outcome.source, &outcome.destination)?;
    tracing::info!(
        "Moved {} to {}",
        outcome.source.display(),
        outcome.destination.display()
    );

    for path in &outcome.removed {
        fs::remove_file(path)?;
        tracing::info!("Removed {}", path.display());
    }

    if tracing::enabled!(tracing::Level::INFO) {
        tracing::info!("Slot layout: {}", describe_layout(config));
        tracing::info!("Current rotation set:");
        for held in current_set(config, paths)? {
            tracing::info!("- {} / slot id {}", held.file.path.display(), held.slot);
        }
    }

    Ok(Some(outcome))
}

/// The first slots of the layout, then the total when there are more.
fn describe_layout(config: &AlgorithmConfig) -> String {
    let mut slots = config.slot_layout();
    let shown: Vec<String> = slots
        .by_ref()
        .take(LAYOUT_SHOWN)
        .map(|slot| slot.to_string())
        .collect();
    let mut text = shown.join(", ");
    if slots.next().is_some() {
        text.push_str(&format!(", ... ({} slots)", config.slot_count()));
    }
    text
}

/// Rename, falling back to copy and remove when the rename crosses devices.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Err(err) = fs::rename(from, to) {
        tracing::debug!("rename failed ({err}); copying {} instead", from.display());
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}
