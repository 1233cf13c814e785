//! Core search node and state identity types.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Composite dedup identity: `(position, collected keys)`.
///
/// The same cell reached with different key subsets is a different state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKeyV1<P> {
    pub position: P,
    pub collected_keys: BTreeSet<P>,
}

/// An immutable node in the search arena.
///
/// Nodes reference their parent by `parent_id`, an index into the arena
/// owned by the running search. The link is only walked for path
/// reconstruction, never for expansion.
///
/// Equality and hashing use the composite identity (`position`,
/// `collected_keys`) only. Frontier ordering uses [`FrontierKey`], so two
/// nodes can be identity-equal while ordering apart.
#[derive(Debug, Clone)]
pub struct SearchNodeV1<P, A> {
    /// Arena index assigned at creation.
    pub node_id: u64,
    /// Parent arena index (`None` for root).
    pub parent_id: Option<u64>,
    /// The cell this node occupies.
    pub position: P,
    /// The move that produced this node (`None` for root).
    pub incoming_action: Option<A>,
    /// Key cells visited along this node's path, owned by value.
    pub collected_keys: BTreeSet<P>,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Cumulative path cost from the root.
    pub g_cost: u64,
    /// Heuristic estimate (0 under uniform-cost search).
    pub h_cost: u64,
    /// Global counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<P: Clone + Ord, A> SearchNodeV1<P, A> {
    /// Construct the root node at cost 0.
    ///
    /// `carries_key` is whether `position` has a key identifier; the root
    /// collects its own cell in that case.
    #[must_use]
    pub fn root(node_id: u64, position: P, carries_key: bool) -> Self {
        let mut collected_keys = BTreeSet::new();
        if carries_key {
            collected_keys.insert(position.clone());
        }
        Self {
            node_id,
            parent_id: None,
            position,
            incoming_action: None,
            collected_keys,
            depth: 0,
            g_cost: 0,
            h_cost: 0,
            creation_order: 0,
        }
    }

    /// Construct a child of `parent`.
    ///
    /// `collected_keys` is a copy of the parent's set, plus `position` when
    /// `carries_key`. The caller supplies `g_cost` (parent cost plus the
    /// terrain cost of entering `position`).
    #[must_use]
    pub fn child(
        node_id: u64,
        parent: &Self,
        action: A,
        position: P,
        carries_key: bool,
        g_cost: u64,
        creation_order: u64,
    ) -> Self {
        let mut collected_keys = parent.collected_keys.clone();
        if carries_key {
            collected_keys.insert(position.clone());
        }
        Self {
            node_id,
            parent_id: Some(parent.node_id),
            position,
            incoming_action: Some(action),
            collected_keys,
            depth: parent.depth.saturating_add(1),
            g_cost,
            h_cost: 0,
            creation_order,
        }
    }

    /// Attach a heuristic estimate before the node is shared.
    #[must_use]
    pub fn with_h_cost(mut self, h_cost: u64) -> Self {
        self.h_cost = h_cost;
        self
    }

    /// The owned `(position, collected keys)` identity of this node.
    #[must_use]
    pub fn state_key(&self) -> StateKeyV1<P> {
        StateKeyV1 {
            position: self.position.clone(),
            collected_keys: self.collected_keys.clone(),
        }
    }
}

impl<P, A> SearchNodeV1<P, A> {
    /// Compute `f_cost = g_cost + h_cost` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> u64 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

impl<P: PartialEq, A> PartialEq for SearchNodeV1<P, A> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.collected_keys == other.collected_keys
    }
}

impl<P: Eq, A> Eq for SearchNodeV1<P, A> {}

impl<P: Hash, A> Hash for SearchNodeV1<P, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
        self.collected_keys.hash(state);
    }
}

/// The frontier ordering key: `(f_cost, creation_order)`.
///
/// Lower `f_cost` first, then older `creation_order` (insertion order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: u64,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl<P, A> From<&SearchNodeV1<P, A>> for FrontierKey {
    fn from(node: &SearchNodeV1<P, A>) -> Self {
        Self {
            f_cost: node.f_cost(),
            creation_order: node.creation_order,
        }
    }
}
