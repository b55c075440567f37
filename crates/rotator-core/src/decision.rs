//! Rotation decisions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::algorithm::RotationAlgorithm;
use crate::config::AlgorithmConfig;
use crate::error::Result;
use crate::ids::{GenerationIndex, SlotId};
use crate::state::RotationState;

/// The outcome of one admission: the id the new archive receives, the slot
/// it occupies, and the held archives it displaces.
///
/// Produced fresh on every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationDecision {
    pub generation: GenerationIndex,
    pub slot: SlotId,
    #[serde(default)]
    pub evict: BTreeSet<GenerationIndex>,
}

/// Decide where the next archive of a rotation family goes.
///
/// Pure and deterministic: the same state and configuration always yield the
/// same decision.
///
/// # Errors
///
/// Returns [`crate::RotatorError::GenerationOverflow`] if the state's newest
/// generation is `u64::MAX`.
pub fn decide(state: &RotationState, config: &AlgorithmConfig) -> Result<RotationDecision> {
    config.decide(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(ids: &[u64]) -> RotationState {
        ids.iter().copied().map(GenerationIndex).collect()
    }

    #[test]
    fn empty_state_admits_generation_zero_without_evictions() {
        for config in [
            AlgorithmConfig::simple(3).unwrap(),
            AlgorithmConfig::hanoi(3).unwrap(),
            AlgorithmConfig::tiered(&[3, 2]).unwrap(),
        ] {
            let decision = decide(&RotationState::new(), &config).unwrap();
            assert_eq!(decision.generation, GenerationIndex(0));
            assert_eq!(decision.slot, SlotId(0));
            assert!(decision.evict.is_empty());
        }
    }

    #[test]
    fn decide_is_deterministic() {
        let config = AlgorithmConfig::tiered(&[3, 2]).unwrap();
        let held = state(&[4, 5, 6, 7]);
        let first = decide(&held, &config).unwrap();
        let second = decide(&held, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tiered_decision_reuses_the_matching_slot() {
        // [3, 2] after generations 0..=11: slots 0,1,2 hold 8,9,10; 3 holds 11; 7 holds 7
        let config = AlgorithmConfig::tiered(&[3, 2]).unwrap();
        let decision = decide(&state(&[7, 8, 9, 10, 11]), &config).unwrap();
        assert_eq!(decision.generation, GenerationIndex(12));
        assert_eq!(decision.slot, SlotId(0));
        assert_eq!(
            decision.evict.into_iter().collect::<Vec<_>>(),
            vec![GenerationIndex(8)]
        );
    }

    #[test]
    fn decision_serializes_to_json() {
        let decision = RotationDecision {
            generation: GenerationIndex(7),
            slot: SlotId(7),
            evict: [GenerationIndex(3)].into_iter().collect(),
        };
        let json = serde_json::to_value(&decision).expect("serialize");
        assert_eq!(json["generation"], 7);
        assert_eq!(json["slot"], 7);
        assert_eq!(json["evict"], serde_json::json!([3]));
    }
}
