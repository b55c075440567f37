//! # rotator-vault
//!
//! File system side of archive rotation.
//!
//! The archives on disk are the only persisted state: each file name carries
//! the generation it was admitted as. This crate reads that state back
//! ([`scan`]), hands it to `rotator-core` for a decision, and carries the
//! decision out ([`rotate`]).

pub mod naming;
pub mod paths;
pub mod rotate;
pub mod scan;

pub use naming::{format_archive_name, parse_archive_name, ArchiveName, DATETIME_FORMAT};
pub use paths::ArchivePaths;
pub use rotate::{rotate, rotate_at, RotateOptions, RotationOutcome};
pub use scan::{current_set, rotation_state, scan, ArchivedFile, HeldArchive};
