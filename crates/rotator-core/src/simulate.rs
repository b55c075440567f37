//! In-memory rotation runs.
//!
//! Replays a sequence of admissions against a [`RotationState`] without any
//! files, to preview a schedule or check an algorithm's long-run behaviour.

use serde::{Deserialize, Serialize};

use crate::algorithm::RotationAlgorithm;
use crate::decision::RotationDecision;
use crate::error::Result;
use crate::ids::GenerationIndex;
use crate::state::RotationState;

/// One admission of a simulated run and the generations held afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStep {
    #[serde(flatten)]
    pub decision: RotationDecision,
    pub held: Vec<GenerationIndex>,
}

/// Admit `runs` archives one after another, starting from `state`.
///
/// # Errors
///
/// Returns [`crate::RotatorError::GenerationOverflow`] if the run would
/// exhaust the generation space.
pub fn simulate<A>(
    algorithm: &A,
    mut state: RotationState,
    runs: u64,
) -> Result<Vec<SimulationStep>>
where
    A: RotationAlgorithm + ?Sized,
{
    let mut steps = Vec::new();
    for _ in 0..runs {
        let decision = algorithm.decide(&state)?;
        state.apply(&decision);
        steps.push(SimulationStep {
            decision,
            held: state.generations().collect(),
        });
    }
    Ok(steps)
}
