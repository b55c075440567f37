//! Tiered rotation, a generalization of grandfather-father-son.
//!
//! Tier 0 is refreshed most often. A run that would land in the overflow
//! position of tier `t` is promoted to tier `t + 1`; the deepest tier
//! absorbs every further promotion.
//!
//! Slot ids encode `(tier, local_slot)` as
//! `local_slot * multiplier + multiplier - 1`, where the multiplier of tier
//! `t` is the product of `capacity + 1` over all shallower tiers. A slot id
//! is therefore the first generation that ever occupies that slot. For tiers
//! `[3, 2]` the slot sequence is 0, 1, 2, 3, 0, 1, 2, 7, 0, 1, 2, 3, ...

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::RotationAlgorithm;
use crate::error::ConfigError;
use crate::ids::{GenerationIndex, SlotId};

/// Where a generation lands in a tiered rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPlacement {
    /// Tier index, 0 being the most frequently refreshed.
    pub tier: usize,
    /// Slot index within the tier.
    pub local_slot: u64,
    /// Globally unique slot id.
    pub slot: SlotId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredRotation {
    tiers: Vec<u64>,
    multipliers: Vec<u64>,
}

impl TieredRotation {
    /// Build a tiered rotation from tier capacities, shallowest first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoCapacity`] if `tiers` is empty,
    /// [`ConfigError::CapacityTooSmall`] if any tier has capacity zero, and
    /// [`ConfigError::TierPeriodOverflow`] if the combined period of all tiers
    /// does not fit in a `u64`.
    pub fn new(tiers: Vec<u64>) -> Result<Self, ConfigError> {
        if tiers.is_empty() {
            return Err(ConfigError::NoCapacity);
        }
        if let Some(tier) = tiers.iter().position(|c| *c == 0) {
            return Err(ConfigError::CapacityTooSmall { tier, value: 0 });
        }

        let overflow = || ConfigError::TierPeriodOverflow {
            tiers: tiers.clone(),
        };
        let mut multipliers = Vec::with_capacity(tiers.len());
        let mut multiplier: u64 = 1;
        for capacity in &tiers {
            multipliers.push(multiplier);
            let period = capacity.checked_add(1).ok_or_else(overflow)?;
            multiplier = multiplier.checked_mul(period).ok_or_else(overflow)?;
        }

        Ok(Self { tiers, multipliers })
    }

    /// Tier capacities, shallowest first.
    #[must_use]
    pub fn tiers(&self) -> &[u64] {
        &self.tiers
    }

    /// Per-tier multipliers: tier `t` refreshes its slots every
    /// `multipliers[t] * (tiers[t] + 1)` runs.
    #[must_use]
    pub fn multipliers(&self) -> &[u64] {
        &self.multipliers
    }

    /// Compute the tier, local slot and global slot of a generation.
    #[must_use]
    pub fn placement(&self, generation: GenerationIndex) -> TierPlacement {
        let deepest = self.tiers.len() - 1;
        let mut reduced = u128::from(generation.0);

        for (tier, capacity) in self.tiers[..deepest].iter().enumerate() {
            let period = u128::from(*capacity) + 1;
            if (reduced + 1) % period != 0 {
                return self.place(tier, reduced % period);
            }
            reduced = (reduced + 1) / period - 1;
        }

        self.place(deepest, reduced % u128::from(self.tiers[deepest]))
    }

    /// Global slot ids of one tier, in local order.
    pub fn tier_slots(&self, tier: usize) -> impl Iterator<Item = SlotId> + '_ {
        let capacity = self.tiers.get(tier).copied().unwrap_or(0);
        (0..capacity).map(move |local| self.place(tier, u128::from(local)).slot)
    }

    fn place(&self, tier: usize, local: u128) -> TierPlacement {
        // local < capacity + 1, and every period fits in u64
        let local_slot = local as u64;
        let multiplier = self.multipliers[tier];
        TierPlacement {
            tier,
            local_slot,
            slot: SlotId(local_slot * multiplier + (multiplier - 1)),
        }
    }
}

impl RotationAlgorithm for TieredRotation {
    fn name(&self) -> &'static str {
        "tiered"
    }

    fn slot_count(&self) -> u64 {
        self.tiers.iter().sum()
    }

    fn slot_for(&self, generation: GenerationIndex) -> SlotId {
        self.placement(generation).slot
    }

    /// Slots grouped by tier, shallowest first.
    fn slot_layout(&self) -> Box<dyn Iterator<Item = SlotId> + '_> {
        Box::new((0..self.tiers.len()).flat_map(move |tier| self.tier_slots(tier)))
    }
}

impl fmt::Display for TieredRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tiered rotation with tiers {:?} (multipliers {:?})",
            self.tiers, self.multipliers
        )
    }
}
