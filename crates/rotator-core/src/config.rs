//! Algorithm configuration and its validation.
//!
//! Capacities arrive as signed integers from the command line or a config
//! file ([`RawAlgorithmConfig`]) and are validated once, at startup, into an
//! [`AlgorithmConfig`]. An invalid configuration never reaches `decide`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::RotationAlgorithm;
use crate::decision::RotationDecision;
use crate::error::{ConfigError, Result};
use crate::hanoi::HanoiRotation;
use crate::ids::{GenerationIndex, SlotId};
use crate::simple::SimpleRotation;
use crate::state::RotationState;
use crate::tiered::TieredRotation;

/// Which rotation strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// First in, first out.
    #[default]
    #[serde(alias = "fifo")]
    Simple,
    /// Tower of Hanoi.
    Hanoi,
    /// Tiered (grandfather-father-son).
    Tiered,
}

impl AlgorithmKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Hanoi => "hanoi",
            Self::Tiered => "tiered",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "fifo" => Ok(Self::Simple),
            "hanoi" => Ok(Self::Hanoi),
            "tiered" => Ok(Self::Tiered),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Configuration input before validation.
/// Capacities are signed so that zero and negative values can be reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAlgorithmConfig {
    #[serde(default)]
    pub algorithm: AlgorithmKind,
    #[serde(default)]
    pub capacities: Vec<i64>,
}

/// A validated rotation strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAlgorithmConfig", into = "RawAlgorithmConfig")]
pub enum AlgorithmConfig {
    Simple(SimpleRotation),
    Hanoi(HanoiRotation),
    Tiered(TieredRotation),
}

impl AlgorithmConfig {
    /// Validate raw input into a configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoCapacity`] if no capacity is given
    /// - [`ConfigError::CapacityTooSmall`] if any capacity is below one
    /// - [`ConfigError::MultipleCapacities`] if Simple or Hanoi get more than one
    /// - [`ConfigError::TierPeriodOverflow`] if tiered periods overflow `u64`
    pub fn from_raw(raw: &RawAlgorithmConfig) -> std::result::Result<Self, ConfigError> {
        if raw.capacities.is_empty() {
            return Err(ConfigError::NoCapacity);
        }
        let capacities = raw
            .capacities
            .iter()
            .enumerate()
            .map(|(tier, value)| {
                u64::try_from(*value)
                    .ok()
                    .filter(|c| *c >= 1)
                    .ok_or(ConfigError::CapacityTooSmall {
                        tier,
                        value: *value,
                    })
            })
            .collect::<std::result::Result<Vec<u64>, _>>()?;

        match raw.algorithm {
            AlgorithmKind::Tiered => Ok(Self::Tiered(TieredRotation::new(capacities)?)),
            kind if capacities.len() > 1 => Err(ConfigError::MultipleCapacities {
                algorithm: kind.as_str(),
                count: capacities.len(),
            }),
            AlgorithmKind::Simple => Ok(Self::Simple(SimpleRotation::new(capacities[0])?)),
            AlgorithmKind::Hanoi => Ok(Self::Hanoi(HanoiRotation::new(capacities[0])?)),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] if `capacity < 1`.
    pub fn simple(capacity: i64) -> std::result::Result<Self, ConfigError> {
        Self::from_raw(&RawAlgorithmConfig {
            algorithm: AlgorithmKind::Simple,
            capacities: vec![capacity],
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] if `capacity < 1`.
    pub fn hanoi(capacity: i64) -> std::result::Result<Self, ConfigError> {
        Self::from_raw(&RawAlgorithmConfig {
            algorithm: AlgorithmKind::Hanoi,
            capacities: vec![capacity],
        })
    }

    /// # Errors
    ///
    /// See [`AlgorithmConfig::from_raw`].
    pub fn tiered(tiers: &[i64]) -> std::result::Result<Self, ConfigError> {
        Self::from_raw(&RawAlgorithmConfig {
            algorithm: AlgorithmKind::Tiered,
            capacities: tiers.to_vec(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Simple(_) => AlgorithmKind::Simple,
            Self::Hanoi(_) => AlgorithmKind::Hanoi,
            Self::Tiered(_) => AlgorithmKind::Tiered,
        }
    }

    fn strategy(&self) -> &dyn RotationAlgorithm {
        match self {
            Self::Simple(rotation) => rotation,
            Self::Hanoi(rotation) => rotation,
            Self::Tiered(rotation) => rotation,
        }
    }
}

impl RotationAlgorithm for AlgorithmConfig {
    fn name(&self) -> &'static str {
        self.strategy().name()
    }

    fn slot_count(&self) -> u64 {
        self.strategy().slot_count()
    }

    fn slot_for(&self, generation: GenerationIndex) -> SlotId {
        self.strategy().slot_for(generation)
    }

    fn slot_layout(&self) -> Box<dyn Iterator<Item = SlotId> + '_> {
        self.strategy().slot_layout()
    }

    fn evictions(
        &self,
        state: &RotationState,
        incoming: GenerationIndex,
    ) -> std::collections::BTreeSet<GenerationIndex> {
        self.strategy().evictions(state, incoming)
    }

    fn decide(&self, state: &RotationState) -> Result<RotationDecision> {
        self.strategy().decide(state)
    }
}

impl TryFrom<RawAlgorithmConfig> for AlgorithmConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAlgorithmConfig) -> std::result::Result<Self, Self::Error> {
        Self::from_raw(&raw)
    }
}

impl From<AlgorithmConfig> for RawAlgorithmConfig {
    fn from(config: AlgorithmConfig) -> Self {
        let capacities = match &config {
            AlgorithmConfig::Simple(rotation) => vec![rotation.capacity()],
            AlgorithmConfig::Hanoi(rotation) => vec![rotation.capacity()],
            AlgorithmConfig::Tiered(rotation) => rotation.tiers().to_vec(),
        };
        Self {
            algorithm: config.kind(),
            // capacities above i64::MAX saturate
            capacities: capacities
                .into_iter()
                .map(|c| i64::try_from(c).unwrap_or(i64::MAX))
                .collect(),
        }
    }
}

impl fmt::Display for AlgorithmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(rotation) => fmt::Display::fmt(rotation, f),
            Self::Hanoi(rotation) => fmt::Display::fmt(rotation, f),
            Self::Tiered(rotation) => fmt::Display::fmt(rotation, f),
        }
    }
}
