//! The rotation strategy seam.

use std::collections::BTreeSet;

use crate::decision::RotationDecision;
use crate::error::Result;
use crate::ids::{GenerationIndex, SlotId};
use crate::state::RotationState;

/// A stateless rotation strategy.
///
/// Implementors map every generation to a slot. Everything else, including
/// the next generation and the evictions, follows from that mapping and the
/// held [`RotationState`], so a strategy carries no state between runs.
pub trait RotationAlgorithm {
    /// Short name used in logs and serialized configuration.
    fn name(&self) -> &'static str;

    /// Number of distinct slots the strategy can ever produce.
    fn slot_count(&self) -> u64;

    /// The slot a generation occupies.
    fn slot_for(&self, generation: GenerationIndex) -> SlotId;

    /// Every slot the strategy can produce, lazily.
    fn slot_layout(&self) -> Box<dyn Iterator<Item = SlotId> + '_> {
        Box::new((0..self.slot_count()).map(SlotId))
    }

    /// Held generations to remove before `incoming` is admitted.
    ///
    /// The default evicts every held generation that maps to the same slot
    /// as `incoming`. Under a consistent history that is at most one.
    fn evictions(
        &self,
        state: &RotationState,
        incoming: GenerationIndex,
    ) -> BTreeSet<GenerationIndex> {
        let target = self.slot_for(incoming);
        state
            .generations()
            .filter(|held| self.slot_for(*held) == target)
            .collect()
    }

    /// Decide where the next archive goes and what it displaces.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RotatorError::GenerationOverflow`] if the newest held
    /// generation is already `u64::MAX`.
    fn decide(&self, state: &RotationState) -> Result<RotationDecision> {
        let generation = state.next_generation()?;
        Ok(RotationDecision {
            generation,
            slot: self.slot_for(generation),
            evict: self.evictions(state, generation),
        })
    }
}
