//! Error types for archive rotation.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for rotation operations.
pub type Result<T> = std::result::Result<T, RotatorError>;

/// Top-level error type for archive rotation.
#[derive(Debug, Error)]
pub enum RotatorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("rotation state exhausted: generation {0} cannot be advanced")]
    GenerationOverflow(u64),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("Specified file ({}) not found", .0.display())]
    InputMissing(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while validating an algorithm configuration.
///
/// These are fatal at startup; no rotation decision is computed from an
/// invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Requires at least one rotation slot.")]
    NoCapacity,

    #[error("Values less than one are not allowed for -n (tier {tier} has {value}).")]
    CapacityTooSmall { tier: usize, value: i64 },

    #[error("Multiple -n values not allowed with the {algorithm} rotator (got {count}).")]
    MultipleCapacities {
        algorithm: &'static str,
        count: usize,
    },

    #[error("tier periods overflow: the product of (capacity + 1) over {tiers:?} exceeds u64")]
    TierPeriodOverflow { tiers: Vec<u64> },

    #[error("unknown rotation algorithm '{0}': expected simple, hanoi or tiered")]
    UnknownAlgorithm(String),
}
