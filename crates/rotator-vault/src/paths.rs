//! Input and output locations of one rotation family.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use rotator_core::{GenerationIndex, Result, RotatorError};

use crate::naming::format_archive_name;

/// Where the file to rotate lives and where its archives go.
///
/// The preserved extension is only used when explicitly configured; it is
/// never guessed from the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePaths {
    input_dir: PathBuf,
    stem: String,
    ext: String,
    output_dir: PathBuf,
}

impl ArchivePaths {
    /// Validate and split the input path.
    ///
    /// # Errors
    ///
    /// Returns [`RotatorError::InvalidPath`] if `ext` does not start with `.`,
    /// if the file name does not end with `ext`, if nothing is left once
    /// `ext` is removed, or if `destination_dir` is not an existing directory.
    pub fn new(path: &Path, ext: &str, destination_dir: Option<&Path>) -> Result<Self> {
        if !ext.is_empty() && !ext.starts_with('.') {
            return Err(RotatorError::InvalidPath(
                "File extension (--ext) must start with the . character.".to_string(),
            ));
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                RotatorError::InvalidPath(format!(
                    "{} does not name a UTF-8 file",
                    path.display()
                ))
            })?;

        let stem = file_name.strip_suffix(ext).ok_or_else(|| {
            RotatorError::InvalidPath(format!(
                "The file {} does not have the file extension {ext}",
                path.display()
            ))
        })?;
        if stem.is_empty() {
            return Err(RotatorError::InvalidPath(format!(
                "The file {} has nothing left once {ext} is removed",
                path.display()
            )));
        }

        let input_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let output_dir = match destination_dir {
            Some(dir) if !dir.is_dir() => {
                return Err(RotatorError::InvalidPath(format!(
                    "The specified destination directory ({}) is not found or is not a directory.",
                    dir.display()
                )));
            }
            Some(dir) => dir.to_path_buf(),
            None => input_dir.clone(),
        };

        Ok(Self {
            input_dir,
            stem: stem.to_string(),
            ext: ext.to_string(),
            output_dir,
        })
    }

    /// The file to rotate in.
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.input_dir.join(format!("{}{}", self.stem, self.ext))
    }

    /// Destination of the archive with the given generation.
    #[must_use]
    pub fn output_path(&self, generation: GenerationIndex, stamped_at: NaiveDateTime) -> PathBuf {
        self.output_dir.join(format_archive_name(
            &self.stem,
            &self.ext,
            generation,
            stamped_at,
        ))
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    #[must_use]
    pub fn ext(&self) -> &str {
        &self.ext
    }
}
