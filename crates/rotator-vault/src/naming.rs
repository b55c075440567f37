//! Archive file naming convention.
//!
//! A rotated archive is named
//! ```text
//! <stem>.<YYYY-MM-DD-HHMMSS>.backup-<generation><ext>
//! ```
//! where `<stem>` is the input file name without the preserved extension.
//! The generation in the name is the only persisted rotation state.

use chrono::NaiveDateTime;

use rotator_core::GenerationIndex;

/// `strftime` format of the timestamp embedded in archive names.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// Separator between the timestamp and the generation.
pub const BACKUP_MARKER: &str = ".backup-";

/// The parts of a rotated archive's file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveName {
    pub stamped_at: NaiveDateTime,
    pub generation: GenerationIndex,
}

/// Build the file name of a rotated archive.
#[must_use]
pub fn format_archive_name(
    stem: &str,
    ext: &str,
    generation: GenerationIndex,
    stamped_at: NaiveDateTime,
) -> String {
    format!(
        "{stem}.{}{BACKUP_MARKER}{generation}{ext}",
        stamped_at.format(DATETIME_FORMAT)
    )
}

/// Parse a file name belonging to the rotation family `stem` + `ext`.
///
/// Returns `None` for anything that is not an archive of that family,
/// including names whose generation does not fit in a `u64`.
#[must_use]
pub fn parse_archive_name(file_name: &str, stem: &str, ext: &str) -> Option<ArchiveName> {
    let rest = file_name.strip_prefix(stem)?.strip_prefix('.')?;
    let rest = rest.strip_suffix(ext)?;
    let (stamp, digits) = rest.rsplit_once(BACKUP_MARKER)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let generation = digits.parse::<u64>().ok()?;
    let stamped_at = NaiveDateTime::parse_from_str(stamp, DATETIME_FORMAT).ok()?;

    Some(ArchiveName {
        stamped_at,
        generation: GenerationIndex(generation),
    })
}
