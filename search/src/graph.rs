//! `SearchGraphV1`: frontier-pop audit log.
//!
//! The normative decision surface is the ordered list of `ExpandEventV1`
//! entries (present when the policy requested a full expansion log). Node
//! summaries are a derived index for path reconstruction.

use crate::canon::{canonical_json_bytes, CanonError};
use crate::digest::{canonical_hash, ContentHash, DOMAIN_SEARCH_GRAPH, DOMAIN_SEARCH_STATE};
use crate::policy::ExpansionLogV1;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraphV1 {
    /// Ordered pop events (empty when the expansion log was off).
    pub expansions: Vec<ExpandEventV1>,
    /// Derived node index sorted by `node_id` ascending.
    pub node_summaries: Vec<SearchGraphNodeSummaryV1>,
    /// Aggregate metadata with policy binding.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier pop and what the driver did with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEventV1 {
    /// Total order of frontier pops.
    pub pop_order: u64,
    /// The popped node.
    pub node_id: u64,
    /// The frontier key at time of pop.
    pub frontier_pop_key: FrontierPopKeyV1,
    pub outcome: PopOutcomeV1,
}

/// The frontier ordering key recorded at pop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierPopKeyV1 {
    pub f_cost: u64,
    pub creation_order: u64,
}

/// Outcome of a single frontier pop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcomeV1 {
    /// Node collected every key; search terminated.
    GoalReached,
    /// State already expanded by an earlier (no more expensive) pop.
    DuplicateSuppressed,
    /// State expanded; one child per legal transition.
    Expanded { children: Vec<u64> },
}

/// Derived node summary for path reconstruction.
#[derive(Debug, Clone)]
pub struct SearchGraphNodeSummaryV1 {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub incoming_action: Option<String>,
    pub position: String,
    pub collected_keys: Vec<String>,
    pub state_fingerprint: String,
    pub depth: u32,
    pub g_cost: u64,
    pub h_cost: u64,
    pub is_goal: bool,
    pub is_on_solution_path: bool,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    // Bindings
    pub heuristic_id: String,
    pub search_policy_digest: String,
    pub root_state_fingerprint: String,
    pub key_count: u64,

    // Counters
    pub total_pops: u64,
    pub total_expansions: u64,
    pub total_nodes_generated: u64,
    pub total_duplicates_suppressed: u64,
    pub total_dead_ends: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,

    // Policy echo
    pub expansion_log: ExpansionLogV1,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// A node holding every key was popped.
    GoalReached { node_id: u64 },
    /// Frontier emptied without a goal pop: provably no solution.
    FrontierExhausted,
    /// `max_expansions` budget was hit before a verdict.
    ExpansionBudgetExceeded,
}

/// Fingerprint of a `(position, collected keys)` state from its rendered form.
///
/// `collected_keys` must already be in canonical (set) order.
///
/// # Errors
///
/// Returns a [`CanonError`] if the state cannot be canonicalized.
pub fn state_fingerprint(
    position: &str,
    collected_keys: &[String],
) -> Result<ContentHash, CanonError> {
    let value = serde_json::json!({
        "collected_keys": collected_keys,
        "position": position,
    });
    let bytes = canonical_json_bytes(&value)?;
    Ok(canonical_hash(DOMAIN_SEARCH_STATE, &bytes))
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraphV1 {
    /// Serialize the graph to canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns a [`CanonError`] if the graph holds a non-integer number.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns a [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_GRAPH, &bytes))
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "frontier_pop_key": {
            "creation_order": e.frontier_pop_key.creation_order,
            "f_cost": e.frontier_pop_key.f_cost,
        },
        "node_id": e.node_id,
        "outcome": outcome_to_json(&e.outcome),
        "pop_order": e.pop_order,
    })
}

fn outcome_to_json(o: &PopOutcomeV1) -> serde_json::Value {
    match o {
        PopOutcomeV1::GoalReached => serde_json::json!({"type": "goal_reached"}),
        PopOutcomeV1::DuplicateSuppressed => serde_json::json!({"type": "duplicate_suppressed"}),
        PopOutcomeV1::Expanded { children } => {
            serde_json::json!({"children": children, "type": "expanded"})
        }
    }
}

fn node_summary_to_json(n: &SearchGraphNodeSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "collected_keys": n.collected_keys,
        "depth": n.depth,
        "g_cost": n.g_cost,
        "h_cost": n.h_cost,
        "incoming_action": n.incoming_action,
        "is_goal": n.is_goal,
        "is_on_solution_path": n.is_on_solution_path,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "position": n.position,
        "state_fingerprint": n.state_fingerprint,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "expansion_log": m.expansion_log.as_str(),
        "frontier_high_water": m.frontier_high_water,
        "heuristic_id": m.heuristic_id,
        "key_count": m.key_count,
        "root_state_fingerprint": m.root_state_fingerprint,
        "search_policy_digest": m.search_policy_digest,
        "termination_reason": termination_reason_to_json(m.termination_reason),
        "total_dead_ends": m.total_dead_ends,
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_nodes_generated": m.total_nodes_generated,
        "total_pops": m.total_pops,
    })
}

fn termination_reason_to_json(r: TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "goal_reached"})
        }
        TerminationReasonV1::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReasonV1::ExpansionBudgetExceeded => {
            serde_json::json!({"type": "expansion_budget_exceeded"})
        }
    }
}
