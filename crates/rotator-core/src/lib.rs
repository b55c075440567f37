//! # rotator-core
//!
//! Slot sequencing and rotation decisions for archive rotation.
//!
//! Given the generations currently held by a rotation family and a validated
//! algorithm configuration, the core decides which generation id the next
//! archive receives, which slot it occupies, and which held archives must be
//! evicted. It never touches the filesystem.
//!
//! - [`RotationAlgorithm`]: the strategy seam
//! - Strategies ([`SimpleRotation`], [`HanoiRotation`], [`TieredRotation`])
//! - [`AlgorithmConfig`]: the validated choice of strategy
//! - [`RotationState`]: held generations, rebuilt on every run
//! - [`RotationDecision`] and [`decide`]
//! - Error hierarchy ([`RotatorError`], [`ConfigError`])

pub mod algorithm;
pub mod config;
pub mod decision;
pub mod error;
pub mod hanoi;
pub mod ids;
pub mod simple;
pub mod simulate;
pub mod state;
pub mod tiered;

pub use algorithm::RotationAlgorithm;
pub use config::{AlgorithmConfig, AlgorithmKind, RawAlgorithmConfig};
pub use decision::{decide, RotationDecision};
pub use error::{ConfigError, Result, RotatorError};
pub use hanoi::HanoiRotation;
pub use ids::{GenerationIndex, SlotId};
pub use simple::SimpleRotation;
pub use simulate::{simulate, SimulationStep};
pub use state::RotationState;
pub use tiered::{TierPlacement, TieredRotation};
