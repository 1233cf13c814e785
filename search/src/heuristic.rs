//! Heuristic estimate seam.
//!
//! The default [`ZeroHeuristic`] makes the search plain uniform-cost search:
//! frontier order is accumulated cost only. A world may supply a tighter
//! estimate, but it must never overestimate the remaining cost to collect
//! every uncollected key, or optimality is lost.

use std::collections::BTreeSet;

use crate::contract::MazeModelV1;

/// Trait for remaining-cost estimates.
pub trait HeuristicV1<M: MazeModelV1 + ?Sized> {
    /// Stable identifier recorded in graph metadata.
    fn heuristic_id(&self) -> &str;

    /// Lower bound on the cost of visiting every key not yet in `collected_keys`,
    /// starting from `position`.
    fn estimate(
        &self,
        model: &M,
        position: &M::Position,
        collected_keys: &BTreeSet<M::Position>,
    ) -> u64;
}

/// Default heuristic: 0 for every state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<M: MazeModelV1 + ?Sized> HeuristicV1<M> for ZeroHeuristic {
    fn heuristic_id(&self) -> &str {
        "zero"
    }

    fn estimate(&self, _model: &M, _position: &M::Position, _collected: &BTreeSet<M::Position>) -> u64 {
        0
    }
}
