//! Search entry points and expansion loop.
//!
//! The driver is uniform-cost search over the augmented state space
//! `position × collected-key subset`. With `k` key cells and `n` cells the
//! number of distinct states is bounded by `n · 2^k`; the visited record
//! and node arena grow accordingly.

use std::collections::BTreeSet;
use std::fmt::Display;

use crate::canon::CanonError;
use crate::contract::MazeModelV1;
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::graph::{
    state_fingerprint, ExpandEventV1, FrontierPopKeyV1, PopOutcomeV1, SearchGraphMetadata,
    SearchGraphNodeSummaryV1, SearchGraphV1, TerminationReasonV1,
};
use crate::heuristic::{HeuristicV1, ZeroHeuristic};
use crate::node::{FrontierKey, SearchNodeV1};
use crate::policy::{ExpansionLogV1, SearchPolicyV1};

/// Aggregate counters for one search invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatsV1 {
    /// Frontier pops, including goal and duplicate pops.
    pub pops: u64,
    /// Pops that passed the expansion gate.
    pub expansions: u64,
    /// Nodes created, root included.
    pub nodes_generated: u64,
    /// Pops discarded because their state was already expanded.
    pub duplicates_suppressed: u64,
    /// Expansions with zero legal transitions.
    pub dead_ends: u64,
    pub frontier_high_water: u64,
}

/// Result of a search execution.
///
/// Check [`SearchResult::termination_reason`] to tell a solution from
/// exhaustion (provably no solution) and from a budget stop.
#[derive(Debug)]
pub struct SearchResult<P, A> {
    pub termination_reason: TerminationReasonV1,
    /// Every node created during search, indexed by `node_id`.
    pub nodes: Vec<SearchNodeV1<P, A>>,
    /// Pop log (empty unless the policy asked for [`ExpansionLogV1::Full`]).
    pub expansions: Vec<ExpandEventV1>,
    pub stats: SearchStatsV1,
    /// Number of key cells the maze defines.
    pub key_count: u64,
    pub heuristic_id: String,
    pub policy: SearchPolicyV1,
}

impl<P, A> SearchResult<P, A> {
    /// Returns `true` if the search terminated because a goal was popped.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.termination_reason,
            TerminationReasonV1::GoalReached { .. }
        )
    }

    /// The goal node (if found).
    #[must_use]
    pub fn goal_node(&self) -> Option<&SearchNodeV1<P, A>> {
        match self.termination_reason {
            TerminationReasonV1::GoalReached { node_id } => self.nodes.get(arena_index(node_id)),
            _ => None,
        }
    }

    /// Node ids from root to goal, inclusive.
    #[must_use]
    pub fn path_node_ids(&self) -> Option<Vec<u64>> {
        self.goal_node()
            .map(|goal| reconstruct_path(&self.nodes, goal.node_id))
    }

    /// Total cost of the solution path.
    #[must_use]
    pub fn path_cost(&self) -> Option<u64> {
        self.goal_node().map(|goal| goal.g_cost)
    }
}

impl<P, A: Clone> SearchResult<P, A> {
    /// The ordered action sequence from the initial position to the goal.
    ///
    /// Empty when the root itself was a goal. `None` when no goal was reached.
    #[must_use]
    pub fn plan(&self) -> Option<Vec<A>> {
        let ids = self.path_node_ids()?;
        Some(
            ids.iter()
                .filter_map(|&id| self.nodes.get(arena_index(id)))
                .filter_map(|n| n.incoming_action.clone())
                .collect(),
        )
    }
}

impl<P: Display, A: Display> SearchResult<P, A> {
    /// Build the canonical audit graph for this search.
    ///
    /// # Errors
    ///
    /// Returns a [`CanonError`] if a state fingerprint or the policy digest
    /// cannot be canonicalized.
    pub fn to_graph(&self) -> Result<SearchGraphV1, CanonError> {
        let on_path: BTreeSet<u64> = self.path_node_ids().unwrap_or_default().into_iter().collect();
        let goal_id = match self.termination_reason {
            TerminationReasonV1::GoalReached { node_id } => Some(node_id),
            _ => None,
        };

        let node_summaries: Vec<SearchGraphNodeSummaryV1> = self
            .nodes
            .iter()
            .map(|n| {
                let position = n.position.to_string();
                let collected_keys: Vec<String> =
                    n.collected_keys.iter().map(ToString::to_string).collect();
                let state_fingerprint =
                    state_fingerprint(&position, &collected_keys)?.hex_digest().to_string();
                Ok(SearchGraphNodeSummaryV1 {
                    node_id: n.node_id,
                    parent_id: n.parent_id,
                    incoming_action: n.incoming_action.as_ref().map(ToString::to_string),
                    position,
                    collected_keys,
                    state_fingerprint,
                    depth: n.depth,
                    g_cost: n.g_cost,
                    h_cost: n.h_cost,
                    is_goal: goal_id == Some(n.node_id),
                    is_on_solution_path: on_path.contains(&n.node_id),
                })
            })
            .collect::<Result<_, CanonError>>()?;

        let root_state_fingerprint = node_summaries
            .first()
            .map(|s| s.state_fingerprint.clone())
            .unwrap_or_default();

        Ok(SearchGraphV1 {
            expansions: self.expansions.clone(),
            node_summaries,
            metadata: SearchGraphMetadata {
                heuristic_id: self.heuristic_id.clone(),
                search_policy_digest: self.policy.digest()?.as_str().to_string(),
                root_state_fingerprint,
                key_count: self.key_count,
                total_pops: self.stats.pops,
                total_expansions: self.stats.expansions,
                total_nodes_generated: self.stats.nodes_generated,
                total_duplicates_suppressed: self.stats.duplicates_suppressed,
                total_dead_ends: self.stats.dead_ends,
                frontier_high_water: self.stats.frontier_high_water,
                termination_reason: self.termination_reason,
                expansion_log: self.policy.expansion_log,
            },
        })
    }
}

/// Find a minimum-cost action sequence that visits every key cell.
///
/// Returns `None` when no such sequence exists. Runs uniform-cost search
/// with the default (unbounded) policy, which cannot fail validation, so
/// `None` here always means the frontier was exhausted.
pub fn solve<M: MazeModelV1 + ?Sized>(model: &M) -> Option<Vec<M::Action>> {
    solve_with(model, &SearchPolicyV1::default(), &ZeroHeuristic)
        .ok()
        .flatten()
}

/// Like [`solve`], with an explicit policy and heuristic.
///
/// `Ok(None)` means provably no solution.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if the policy fails validation.
/// - [`SearchError::ExpansionBudgetExceeded`] if the budget stopped the
///   search before a verdict.
pub fn solve_with<M: MazeModelV1 + ?Sized>(
    model: &M,
    policy: &SearchPolicyV1,
    heuristic: &dyn HeuristicV1<M>,
) -> Result<Option<Vec<M::Action>>, SearchError> {
    let result = search(model, policy, heuristic)?;
    match result.termination_reason {
        TerminationReasonV1::GoalReached { .. } => Ok(result.plan()),
        TerminationReasonV1::FrontierExhausted => Ok(None),
        TerminationReasonV1::ExpansionBudgetExceeded => Err(SearchError::ExpansionBudgetExceeded {
            expansions: result.stats.expansions,
        }),
    }
}

/// Run best-first search from the maze's initial position.
///
/// Every runtime termination (goal, exhaustion, budget) returns
/// `Ok(SearchResult)`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight policy
/// validation failures. No search steps are taken in that case.
pub fn search<M: MazeModelV1 + ?Sized>(
    model: &M,
    policy: &SearchPolicyV1,
    heuristic: &dyn HeuristicV1<M>,
) -> Result<SearchResult<M::Position, M::Action>, SearchError> {
    policy.validate()?;

    let key_count = model.key_positions().len() as u64;
    let log_pops = policy.expansion_log == ExpansionLogV1::Full;

    let mut frontier: BestFirstFrontier<M::Position> = BestFirstFrontier::new();
    let mut nodes: Vec<SearchNodeV1<M::Position, M::Action>> = Vec::new();
    let mut expansions: Vec<ExpandEventV1> = Vec::new();
    let mut stats = SearchStatsV1::default();
    let mut next_creation_order: u64 = 1;

    let initial = model.initial_position();
    let root_carries_key = model.key_identifier(&initial).is_some();
    let root = SearchNodeV1::root(0, initial, root_carries_key);
    let root_h = heuristic.estimate(model, &root.position, &root.collected_keys);
    let root = root.with_h_cost(root_h);
    frontier.push(root.node_id, FrontierKey::from(&root));
    nodes.push(root);
    stats.nodes_generated = 1;

    tracing::debug!(
        key_count,
        heuristic = heuristic.heuristic_id(),
        max_expansions = policy.max_expansions,
        budgeted = policy.is_budgeted(),
        "search started"
    );

    let termination_reason = loop {
        let Some((node_id, pop_key)) = frontier.pop() else {
            break TerminationReasonV1::FrontierExhausted;
        };
        stats.pops += 1;
        let pop_order = stats.pops - 1;
        let frontier_pop_key = FrontierPopKeyV1 {
            f_cost: pop_key.f_cost,
            creation_order: pop_key.creation_order,
        };

        let current = &nodes[arena_index(node_id)];
        tracing::trace!(node_id, f_cost = pop_key.f_cost, g_cost = current.g_cost, "pop");

        // Construction already collected a key at this cell.
        debug_assert!(
            model.key_identifier(&current.position).is_none()
                || current.collected_keys.contains(&current.position),
            "node {node_id} sits on a key cell it has not collected"
        );

        if current.collected_keys.len() as u64 == key_count {
            if log_pops {
                expansions.push(ExpandEventV1 {
                    pop_order,
                    node_id,
                    frontier_pop_key,
                    outcome: PopOutcomeV1::GoalReached,
                });
            }
            break TerminationReasonV1::GoalReached { node_id };
        }

        if !frontier.mark_expanded(current.state_key()) {
            stats.duplicates_suppressed += 1;
            if log_pops {
                expansions.push(ExpandEventV1 {
                    pop_order,
                    node_id,
                    frontier_pop_key,
                    outcome: PopOutcomeV1::DuplicateSuppressed,
                });
            }
            continue;
        }

        // A budget stop leaves the claimed state unexpanded; the search ends here.
        if stats.expansions >= policy.max_expansions {
            break TerminationReasonV1::ExpansionBudgetExceeded;
        }
        stats.expansions += 1;

        let transitions = model.transitions_from(&current.position);
        let mut children = Vec::with_capacity(transitions.len());
        let mut next_node_id = nodes.len() as u64;
        for (action, position) in transitions {
            let g_cost = current.g_cost.saturating_add(model.step_cost(&position));
            let carries_key = model.key_identifier(&position).is_some();
            let child = SearchNodeV1::child(
                next_node_id,
                current,
                action,
                position,
                carries_key,
                g_cost,
                next_creation_order,
            );
            let h_cost = heuristic.estimate(model, &child.position, &child.collected_keys);
            children.push(child.with_h_cost(h_cost));
            next_node_id += 1;
            next_creation_order += 1;
        }

        if children.is_empty() {
            stats.dead_ends += 1;
        }
        stats.nodes_generated += children.len() as u64;

        let child_ids: Vec<u64> = if log_pops {
            children.iter().map(|c| c.node_id).collect()
        } else {
            Vec::new()
        };
        for child in children {
            frontier.push(child.node_id, FrontierKey::from(&child));
            nodes.push(child);
        }

        if log_pops {
            expansions.push(ExpandEventV1 {
                pop_order,
                node_id,
                frontier_pop_key,
                outcome: PopOutcomeV1::Expanded {
                    children: child_ids,
                },
            });
        }
    };

    stats.frontier_high_water = frontier.high_water();

    tracing::debug!(
        ?termination_reason,
        pops = stats.pops,
        expansions = stats.expansions,
        nodes = stats.nodes_generated,
        duplicates = stats.duplicates_suppressed,
        distinct_states = frontier.expanded_count(),
        "search finished"
    );

    Ok(SearchResult {
        termination_reason,
        nodes,
        expansions,
        stats,
        key_count,
        heuristic_id: heuristic.heuristic_id().to_string(),
        policy: policy.clone(),
    })
}

/// Reconstruct the node-id path from root to `goal_node_id`, inclusive.
///
/// `nodes` must be the arena of the search that produced `goal_node_id`.
#[must_use]
pub fn reconstruct_path<P, A>(nodes: &[SearchNodeV1<P, A>], goal_node_id: u64) -> Vec<u64> {
    let mut path = Vec::new();
    let mut current_id = Some(goal_node_id);

    while let Some(id) = current_id {
        let Some(node) = nodes.get(arena_index(id)) else {
            break;
        };
        path.push(id);
        current_id = node.parent_id;
    }

    path.reverse();
    path
}

#[allow(clippy::cast_possible_truncation)]
fn arena_index(node_id: u64) -> usize {
    node_id as usize
}
