//! Maze model contract trait.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for mazes that support multi-key search.
///
/// The search layer treats the maze as a pure query surface. It never
/// inspects terrain or coordinates directly.
///
/// # Contract
///
/// - All queries are pure: same input → same output, no side effects.
/// - `transitions_from` excludes moves into impassable cells.
/// - `key_identifier(p)` is `Some` iff `p` is in `key_positions()`.
/// - `step_cost` is the cost of *entering* a cell; it is charged once per
///   move, attributed to the destination.
pub trait MazeModelV1 {
    /// A single traversable cell.
    type Position: Clone + Eq + Ord + Hash + Debug;
    /// A move label (e.g. `"U"`). `Ord` fixes the enumeration order.
    type Action: Clone + Eq + Ord + Debug;
    /// Identifier carried by key cells.
    type KeyId: Debug;

    /// The cell the search starts from.
    fn initial_position(&self) -> Self::Position;

    /// Every cell that must be visited at least once.
    fn key_positions(&self) -> BTreeSet<Self::Position>;

    /// Legal single-step moves from `position`, keyed by action label.
    fn transitions_from(&self, position: &Self::Position) -> BTreeMap<Self::Action, Self::Position>;

    /// Terrain cost of entering `position`.
    fn step_cost(&self, position: &Self::Position) -> u64;

    /// The key carried by `position`, if it is a key cell.
    fn key_identifier(&self, position: &Self::Position) -> Option<Self::KeyId>;
}
