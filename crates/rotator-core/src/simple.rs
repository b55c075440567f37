//! First-in-first-out rotation.

use std::collections::BTreeSet;
use std::fmt;

use crate::algorithm::RotationAlgorithm;
use crate::error::ConfigError;
use crate::ids::{GenerationIndex, SlotId};
use crate::state::RotationState;

/// Keeps the `capacity` most recent archives.
///
/// Generation ids grow without bound; the slot is the generation's position
/// in a ring of `capacity` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleRotation {
    capacity: u64,
}

impl SimpleRotation {
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityTooSmall`] if `capacity` is zero.
    pub fn new(capacity: u64) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::CapacityTooSmall { tier: 0, value: 0 });
        }
        Ok(Self { capacity })
    }

    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl RotationAlgorithm for SimpleRotation {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn slot_count(&self) -> u64 {
        self.capacity
    }

    fn slot_for(&self, generation: GenerationIndex) -> SlotId {
        SlotId(generation.0 % self.capacity)
    }

    /// Drops the oldest held generations until one place is free.
    ///
    /// Works on sparse or oversized sets too, e.g. after the capacity was
    /// lowered between runs.
    fn evictions(
        &self,
        state: &RotationState,
        _incoming: GenerationIndex,
    ) -> BTreeSet<GenerationIndex> {
        let held = state.len() as u64;
        let excess = held.saturating_sub(self.capacity - 1);
        // excess <= held, which came from a usize
        state.generations().take(excess as usize).collect()
    }
}

impl fmt::Display for SimpleRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simple (FIFO) rotation over slots 0..{}", self.capacity)
    }
}
