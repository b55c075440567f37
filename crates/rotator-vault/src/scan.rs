//! Reconstruct rotation state from the archives on disk.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;

use rotator_core::{GenerationIndex, Result, RotationAlgorithm, RotationState, SlotId};

use crate::naming::parse_archive_name;
use crate::paths::ArchivePaths;

/// An archive of the rotation family found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedFile {
    pub path: PathBuf,
    pub generation: GenerationIndex,
    pub stamped_at: NaiveDateTime,
}

/// An archived file together with the slot it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeldArchive {
    #[serde(flatten)]
    pub file: ArchivedFile,
    pub slot: SlotId,
}

/// List the archives of a rotation family, oldest generation first.
///
/// Files that do not follow the naming convention are ignored.
///
/// # Errors
///
/// Returns [`rotator_core::RotatorError::Io`] if the output directory cannot
/// be read.
pub fn scan(paths: &ArchivePaths) -> Result<Vec<ArchivedFile>> {
    let mut archives = Vec::new();

    for entry in fs::read_dir(paths.output_dir())? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        match parse_archive_name(name, paths.stem(), paths.ext()) {
            Some(parsed) => archives.push(ArchivedFile {
                path: entry.path(),
                generation: parsed.generation,
                stamped_at: parsed.stamped_at,
            }),
            None => tracing::trace!("Skipping {name}: not an archive of {}", paths.stem()),
        }
    }

    archives.sort_by(|a, b| {
        a.generation
            .cmp(&b.generation)
            .then_with(|| a.path.cmp(&b.path))
    });
    Ok(archives)
}

/// The held generations of a scanned family.
#[must_use]
pub fn rotation_state(archives: &[ArchivedFile]) -> RotationState {
    archives.iter().map(|archive| archive.generation).collect()
}

/// Scan a family and annotate each archive with its slot under `algorithm`.
///
/// # Errors
///
/// See [`scan`].
pub fn current_set<A>(algorithm: &A, paths: &ArchivePaths) -> Result<Vec<HeldArchive>>
where
    A: RotationAlgorithm + ?Sized,
{
    Ok(scan(paths)?
        .into_iter()
        .map(|file| HeldArchive {
            slot: algorithm.slot_for(file.generation),
            file,
        })
        .collect())
}
