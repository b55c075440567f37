//! Property-based tests for the rotation algorithms.
//!
//! Covers the long-run guarantees of each strategy and the equivalences
//! between tiered rotation and its two degenerate cases.

use std::collections::BTreeSet;

use proptest::prelude::*;

use rotator_core::{
    decide, simulate, AlgorithmConfig, ConfigError, GenerationIndex, HanoiRotation,
    RotationAlgorithm, RotationState, SlotId, TieredRotation,
};

// =============================================================================
// Strategies
// =============================================================================

/// Arbitrary held set of up to 40 generations below 10_000.
fn arb_state() -> impl Strategy<Value = RotationState> {
    prop::collection::btree_set(0u64..10_000, 0..40)
        .prop_map(|ids| ids.into_iter().map(GenerationIndex).collect())
}

/// Arbitrary valid configuration of any kind.
fn arb_config() -> impl Strategy<Value = AlgorithmConfig> {
    prop_oneof![
        (1i64..30).prop_map(|n| AlgorithmConfig::simple(n).unwrap()),
        (1i64..30).prop_map(|n| AlgorithmConfig::hanoi(n).unwrap()),
        prop::collection::vec(1i64..8, 1..5).prop_map(|t| AlgorithmConfig::tiered(&t).unwrap()),
    ]
}

// =============================================================================
// Simple
// =============================================================================

proptest! {
    /// After k >= n admissions the retained set is exactly the n most recent.
    #[test]
    fn simple_retains_the_most_recent(n in 1i64..20, extra in 0u64..150) {
        let capacity = n as u64;
        let runs = capacity + extra;
        let config = AlgorithmConfig::simple(n).unwrap();
        let steps = simulate(&config, RotationState::new(), runs).unwrap();

        let held = &steps.last().unwrap().held;
        let expected: Vec<GenerationIndex> =
            (runs - capacity..runs).map(GenerationIndex).collect();
        prop_assert_eq!(held, &expected);
    }

    /// Simple never holds more than its capacity once a rotation completes.
    #[test]
    fn simple_decision_respects_capacity(n in 1i64..20, state in arb_state()) {
        let config = AlgorithmConfig::simple(n).unwrap();
        let mut state = state;
        let decision = decide(&state, &config).unwrap();
        state.apply(&decision);
        prop_assert!(state.len() as u64 <= n as u64);
    }
}

// =============================================================================
// Hanoi
// =============================================================================

proptest! {
    /// The slot is the trailing-zero count of g + 1, clamped to the top slot.
    #[test]
    fn hanoi_slot_is_clamped_trailing_zeros(g in 0u64..u64::MAX, n in 1u64..80) {
        let rotation = HanoiRotation::new(n).unwrap();
        let expected = u64::from((g + 1).trailing_zeros()).min(n - 1);
        prop_assert_eq!(rotation.slot_for(GenerationIndex(g)), SlotId(expected));
    }

    /// Slot i (below the top) is used exactly once every 2^(i+1) runs.
    #[test]
    fn hanoi_lower_slots_have_power_of_two_periods(n in 2u64..8) {
        let rotation = HanoiRotation::new(n).unwrap();
        for slot in 0..n - 1 {
            let hits: Vec<u64> = (0..256u64)
                .filter(|g| rotation.slot_for(GenerationIndex(*g)) == SlotId(slot))
                .collect();
            let period = 1u64 << (slot + 1);
            for pair in hits.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], period);
            }
        }
    }
}

// =============================================================================
// Tiered
// =============================================================================

proptest! {
    /// A single tier behaves exactly like Simple with the same capacity.
    #[test]
    fn single_tier_matches_simple(n in 1i64..16) {
        let tiered = AlgorithmConfig::tiered(&[n]).unwrap();
        let simple = AlgorithmConfig::simple(n).unwrap();

        let tiered_steps = simulate(&tiered, RotationState::new(), 51).unwrap();
        let simple_steps = simulate(&simple, RotationState::new(), 51).unwrap();
        prop_assert_eq!(tiered_steps, simple_steps);
    }

    /// m tiers of capacity one behave exactly like Hanoi with m slots.
    #[test]
    fn unit_tiers_match_hanoi(m in 1usize..10) {
        let tiered = TieredRotation::new(vec![1; m]).unwrap();
        let hanoi = HanoiRotation::new(m as u64).unwrap();

        for g in 0..=100u64 {
            let placement = tiered.placement(GenerationIndex(g));
            prop_assert_eq!(placement.tier as u64, hanoi.slot_for(GenerationIndex(g)).0);
            prop_assert_eq!(placement.local_slot, 0);
        }

        let tiered_steps = simulate(&tiered, RotationState::new(), 101).unwrap();
        let hanoi_steps = simulate(&hanoi, RotationState::new(), 101).unwrap();
        for (t, h) in tiered_steps.iter().zip(&hanoi_steps) {
            prop_assert_eq!(t.decision.generation, h.decision.generation);
            prop_assert_eq!(&t.decision.evict, &h.decision.evict);
            prop_assert_eq!(&t.held, &h.held);
        }
    }

    /// Every slot holds at most one archive and the set never outgrows the layout.
    #[test]
    fn tiered_holds_one_archive_per_slot(tiers in prop::collection::vec(1i64..6, 1..4), runs in 0u64..400) {
        let config = AlgorithmConfig::tiered(&tiers).unwrap();
        let steps = simulate(&config, RotationState::new(), runs).unwrap();

        for step in &steps {
            prop_assert!(step.decision.evict.len() <= 1);
            let slots: BTreeSet<SlotId> =
                step.held.iter().map(|g| config.slot_for(*g)).collect();
            prop_assert_eq!(slots.len(), step.held.len());
            prop_assert!(step.held.len() as u64 <= config.slot_count());
        }
    }

    /// Local slots stay inside their tier and promotions happen on the overflow position.
    #[test]
    fn tiered_placement_stays_in_bounds(tiers in prop::collection::vec(1u64..6, 1..5), g in 0u64..1_000_000) {
        let rotation = TieredRotation::new(tiers.clone()).unwrap();
        let placement = rotation.placement(GenerationIndex(g));
        prop_assert!(placement.tier < tiers.len());
        prop_assert!(placement.local_slot < tiers[placement.tier]);
        prop_assert!(rotation.tier_slots(placement.tier).any(|s| s == placement.slot));
    }
}

// =============================================================================
// Shared
// =============================================================================

proptest! {
    /// Repeated decisions over unchanged input are identical.
    #[test]
    fn decide_is_deterministic(config in arb_config(), state in arb_state()) {
        let first = decide(&state, &config).unwrap();
        let second = decide(&state, &config).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.generation, state.next_generation().unwrap());
        prop_assert!(first.evict.iter().all(|g| state.contains(*g)));
    }

    /// Any capacity below one is a configuration error, whatever the algorithm.
    #[test]
    fn non_positive_capacities_are_rejected(bad in i64::MIN..1, tiers in prop::collection::vec(1i64..10, 0..4), at in 0usize..4) {
        prop_assert!(matches!(
            AlgorithmConfig::simple(bad),
            Err(ConfigError::CapacityTooSmall { .. })
        ), "expected CapacityTooSmall from simple");
        prop_assert!(matches!(
            AlgorithmConfig::hanoi(bad),
            Err(ConfigError::CapacityTooSmall { .. })
        ), "expected CapacityTooSmall from hanoi");

        let mut tiers = tiers;
        let at = at.min(tiers.len());
        tiers.insert(at, bad);
        prop_assert_eq!(
            AlgorithmConfig::tiered(&tiers),
            Err(ConfigError::CapacityTooSmall { tier: at, value: bad })
        );
    }
}

#[test]
fn worked_examples_hold_through_the_public_api() {
    let config = AlgorithmConfig::tiered(&[3, 2]).unwrap();
    let slots: Vec<u64> = simulate(&config, RotationState::new(), 8)
        .unwrap()
        .into_iter()
        .map(|step| step.decision.slot.0)
        .collect();
    assert_eq!(slots, vec![0, 1, 2, 3, 0, 1, 2, 7]);

    let config = AlgorithmConfig::hanoi(5).unwrap();
    let slots: Vec<u64> = simulate(&config, RotationState::new(), 7)
        .unwrap()
        .into_iter()
        .map(|step| step.decision.slot.0)
        .collect();
    assert_eq!(slots, vec![0, 1, 0, 2, 0, 1, 0]);
}
