//! Resolve effective settings from flags and an optional TOML file.
//!
//! ```toml
//! algorithm = "tiered"
//! capacities = [7, 4, 12]
//! ext = ".tar.gz"
//! destination_dir = "/var/backups/db"
//! ignore_missing = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use rotator_core::{AlgorithmConfig, AlgorithmKind, RawAlgorithmConfig};

use crate::cli::Cli;

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub algorithm: Option<AlgorithmKind>,
    #[serde(default)]
    pub capacities: Vec<i64>,
    pub ext: Option<String>,
    pub destination_dir: Option<PathBuf>,
    #[serde(default)]
    pub ignore_missing: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Validated settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub algorithm: AlgorithmConfig,
    pub ext: String,
    pub destination_dir: Option<PathBuf>,
    pub ignore_missing: bool,
}

impl Settings {
    /// Merge the command line over the config file (if any) and validate.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let algorithm = if cli.tiered {
            AlgorithmKind::Tiered
        } else if cli.hanoi {
            AlgorithmKind::Hanoi
        } else if cli.simple {
            AlgorithmKind::Simple
        } else {
            file.algorithm.unwrap_or_default()
        };
        let capacities = if cli.num.is_empty() {
            file.capacities
        } else {
            cli.num.clone()
        };

        let algorithm = AlgorithmConfig::from_raw(&RawAlgorithmConfig {
            algorithm,
            capacities,
        })?;

        Ok(Self {
            algorithm,
            ext: cli.ext.clone().or(file.ext).unwrap_or_default(),
            destination_dir: cli.destination_dir.clone().or(file.destination_dir),
            ignore_missing: cli.ignore_missing || file.ignore_missing,
        })
    }
}
