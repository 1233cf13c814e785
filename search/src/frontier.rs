//! Cost-ordered frontier with an expanded-state record.
//!
//! The frontier stores arena handles, not nodes. Deduplication happens at
//! pop time: a node is pushed unconditionally, and only the first pop of a
//! given `(position, collected keys)` identity is expanded. Because pops
//! come out in non-decreasing cost order, that first pop is the cheapest.
//!
//! Uses a `BTreeSet`-based expanded record (not `HashSet`) so membership
//! never depends on hasher seeding.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::node::{FrontierKey, StateKeyV1};

/// A frontier entry wrapping an arena handle with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node_id: u64,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the cheapest node handle
/// - A `BTreeSet<StateKeyV1<P>>` of already-expanded state identities
pub struct BestFirstFrontier<P> {
    heap: BinaryHeap<FrontierEntry>,
    expanded: BTreeSet<StateKeyV1<P>>,
    high_water: u64,
}

impl<P: Ord> BestFirstFrontier<P> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            expanded: BTreeSet::new(),
            high_water: 0,
        }
    }

    /// Push a node handle with its ordering key.
    pub fn push(&mut self, node_id: u64, key: FrontierKey) {
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node_id,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the cheapest node handle.
    #[must_use]
    pub fn pop(&mut self) -> Option<(u64, FrontierKey)> {
        self.heap.pop().map(|e| (e.node_id, e.key.0))
    }

    /// Record `state` as expanded.
    ///
    /// Returns `false` if it was already expanded (the caller must discard
    /// the popped node).
    pub fn mark_expanded(&mut self, state: StateKeyV1<P>) -> bool {
        self.expanded.insert(state)
    }

    /// Number of distinct expanded states.
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

impl<P: Ord> Default for BestFirstFrontier<P> {
    fn default() -> Self {
        Self::new()
    }
}
