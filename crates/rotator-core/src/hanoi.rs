//! Tower of Hanoi rotation.

use std::fmt;

use crate::algorithm::RotationAlgorithm;
use crate::error::ConfigError;
use crate::ids::{GenerationIndex, SlotId};

/// Slots 0..=64 are the only ones a `u64` generation can reach.
const MAX_SLOTS: u64 = u64::BITS as u64 + 1;

/// Slot `i` is refreshed every `2^(i+1)` runs; the highest slot absorbs
/// everything the lower slots do not claim.
///
/// Generation `g` lands in slot `min(trailing_zeros(g + 1), capacity - 1)`,
/// giving the sequence 0, 1, 0, 2, 0, 1, 0, 3, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HanoiRotation {
    capacity: u64,
}

impl HanoiRotation {
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

impl RotationAlgorithm for HanoiRotation {
    fn name(&self) -> &'static str {
        "hanoi"
    }

    /// Trailing zeros of `g + 1` never exceed 64, so slots above 64 stay empty.
    fn slot_count(&self) -> u64 {
        self.capacity.min(MAX_SLOTS)
    }

    fn slot_for(&self, generation: GenerationIndex) -> SlotId {
        // g + 1 == 2^64 has 64 trailing zeros
        let disk = generation
            .0
            .checked_add(1)
            .map_or(u64::BITS, u64::trailing_zeros);
        SlotId(u64::from(disk).min(self.capacity - 1))
    }
}

impl fmt::Display for HanoiRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tower of hanoi rotation over slots 0..{}",
            self.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RotationState;

    fn slots(rotation: &HanoiRotation, runs: u64) -> Vec<u64> {
        (0..runs)
            .map(|g| rotation.slot_for(GenerationIndex(g)).0)
            .collect()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(HanoiRotation::new(0).is_err());
    }

    #[test]
    fn first_seven_generations_follow_the_disk_pattern() {
        let rotation = HanoiRotation::new(8).unwrap();
        assert_eq!(slots(&rotation, 7), vec![0, 1, 0, 2, 0, 1, 0]);
    }

    #[test]
    fn long_sequence_matches_classic_moves() {
        let rotation = HanoiRotation::new(8).unwrap();
        assert_eq!(
            slots(&rotation, 16),
            vec![0, 1, 0, 2, 0, 1, 0, 3, 0, 1, 0, 2, 0, 1, 0, 4]
        );
    }

    #[test]
    fn highest_slot_absorbs_overflow() {
        let rotation = HanoiRotation::new(3).unwrap();
        assert_eq!(
            slots(&rotation, 16),
            vec![0, 1, 0, 2, 0, 1, 0, 2, 0, 1, 0, 2, 0, 1, 0, 2]
        );
    }

    #[test]
    fn single_slot_always_reuses_slot_zero() {
        let rotation = HanoiRotation::new(1).unwrap();
        assert!(slots(&rotation, 10).iter().all(|s| *s == 0));
    }

    #[test]
    fn last_representable_generation_uses_top_slot() {
        let rotation = HanoiRotation::new(70).unwrap();
        assert_eq!(rotation.slot_for(GenerationIndex(u64::MAX)), SlotId(64));
    }

    #[test]
    fn slot_count_is_bounded_by_reachable_slots() {
        assert_eq!(HanoiRotation::new(20).unwrap().slot_count(), 20);
        assert_eq!(HanoiRotation::new(65).unwrap().slot_count(), 65);
        let huge = HanoiRotation::new(1 << 40).unwrap();
        assert_eq!(huge.slot_count(), 65);
        assert_eq!(huge.slot_layout().last(), Some(SlotId(64)));
    }

    #[test]
    fn decide_replaces_the_occupant_of_the_target_slot() {
        let rotation = HanoiRotation::new(4).unwrap();
        // generations 0..=4 hold slots 0,1,0,2,0; only 1, 3 and 4 survive
        let state: RotationState = [1, 3, 4].into_iter().map(GenerationIndex).collect();
        let decision = rotation.decide(&state).unwrap();
        assert_eq!(decision.generation, GenerationIndex(5));
        assert_eq!(decision.slot, SlotId(1));
        assert_eq!(
            decision.evict.into_iter().collect::<Vec<_>>(),
            vec![GenerationIndex(1)]
        );
    }
}
