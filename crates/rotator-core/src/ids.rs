//! Identifier types: generation indices and slot ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal of an archive within its rotation family.
///
/// Strictly increasing across rotations and never reused. This is the number
/// stamped into an archive's file name, so it doubles as the archive's
/// identity on disk.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GenerationIndex(pub u64);

impl GenerationIndex {
    /// The first generation of an empty rotation family.
    pub const FIRST: Self = Self(0);

    /// The generation admitted after this one, or `None` when `u64` is exhausted.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for GenerationIndex {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for GenerationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reusable position in a rotation. Its occupant is replaced on reuse.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SlotId(pub u64);

impl SlotId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SlotId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
