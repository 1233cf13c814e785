//! Plan replay: the soundness check for search output.
//!
//! Replays an action sequence against a maze from its initial position,
//! rejecting any move that is not a legal transition and any plan that
//! ends without every key collected. Uses only the [`MazeModelV1`] surface,
//! so it checks the search against the same contract the search consumed.

use std::collections::BTreeSet;

use waypoint_search::contract::MazeModelV1;

/// Outcome of a successful replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Sum of entry costs along the plan.
    pub cost: u64,
    /// Number of moves replayed.
    pub steps: usize,
    /// Distinct key cells visited, the initial cell included.
    pub keys_visited: usize,
}

/// Why a plan is not a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// No plan was supplied (the search reported no solution).
    NoPlan,
    /// `action` at index `step` is not a legal transition from the current cell.
    IllegalMove { step: usize, action: String },
    /// The plan ended with keys still uncollected.
    MissingKeys { missing: usize },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPlan => write!(f, "no plan to replay"),
            Self::IllegalMove { step, action } => {
                write!(f, "illegal move {action} at step {step}")
            }
            Self::MissingKeys { missing } => {
                write!(f, "plan ends with {missing} key(s) uncollected")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Replay `plan` against `model`.
///
/// # Errors
///
/// Returns [`ReplayError::NoPlan`] for `None`, [`ReplayError::IllegalMove`]
/// for a move with no matching transition, and [`ReplayError::MissingKeys`]
/// if the plan does not visit every key cell.
pub fn replay_plan<M: MazeModelV1 + ?Sized>(
    model: &M,
    plan: Option<&[M::Action]>,
) -> Result<ReplayReport, ReplayError> {
    let plan = plan.ok_or(ReplayError::NoPlan)?;
    let required = model.key_positions();

    let mut position = model.initial_position();
    let mut visited: BTreeSet<M::Position> = BTreeSet::new();
    if required.contains(&position) {
        visited.insert(position.clone());
    }

    let mut cost: u64 = 0;
    for (step, action) in plan.iter().enumerate() {
        let next = model
            .transitions_from(&position)
            .remove(action)
            .ok_or_else(|| ReplayError::IllegalMove {
                step,
                action: format!("{action:?}"),
            })?;
        cost = cost.saturating_add(model.step_cost(&next));
        if required.contains(&next) {
            visited.insert(next.clone());
        }
        position = next;
    }

    let missing = required.len() - visited.len();
    if missing > 0 {
        return Err(ReplayError::MissingKeys { missing });
    }
    Ok(ReplayReport {
        cost,
        steps: plan.len(),
        keys_visited: visited.len(),
    })
}
