//! The generations currently held by one rotation family.
//!
//! A [`RotationState`] is rebuilt from scratch on every run from whatever
//! listing the caller has (file names on disk, in practice). The next
//! generation is derived from it, never stored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::decision::RotationDecision;
use crate::error::{Result, RotatorError};
use crate::ids::GenerationIndex;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationState {
    generations: BTreeSet<GenerationIndex>,
}

impl RotationState {
    /// An empty rotation family.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    #[must_use]
    pub fn contains(&self, generation: GenerationIndex) -> bool {
        self.generations.contains(&generation)
    }

    /// Held generations, oldest first.
    pub fn generations(&self) -> impl DoubleEndedIterator<Item = GenerationIndex> + '_ {
        self.generations.iter().copied()
    }

    /// The newest held generation.
    #[must_use]
    pub fn latest(&self) -> Option<GenerationIndex> {
        self.generations.last().copied()
    }

    /// The generation the next admitted archive receives:
    /// one past the newest held generation, or 0 for an empty family.
    ///
    /// # Errors
    ///
    /// Returns [`RotatorError::GenerationOverflow`] if the newest held
    /// generation is `u64::MAX`.
    pub fn next_generation(&self) -> Result<GenerationIndex> {
        match self.latest() {
            None => Ok(GenerationIndex::FIRST),
            Some(latest) => latest
                .next()
                .ok_or(RotatorError::GenerationOverflow(latest.0)),
        }
    }

    /// Apply a decision in memory: drop the evicted generations, then admit
    /// the new one.
    pub fn apply(&mut self, decision: &RotationDecision) {
        for evicted in &decision.evict {
            self.generations.remove(evicted);
        }
        self.generations.insert(decision.generation);
    }
}

impl FromIterator<GenerationIndex> for RotationState {
    fn from_iter<I: IntoIterator<Item = GenerationIndex>>(iter: I) -> Self {
        Self {
            generations: iter.into_iter().collect(),
        }
    }
}

impl Extend<GenerationIndex> for RotationState {
    fn extend<I: IntoIterator<Item = GenerationIndex>>(&mut self, iter: I) {
        self.generations.extend(iter);
    }
}
