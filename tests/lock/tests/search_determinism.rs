//! Search determinism and audit-graph lock tests.
//!
//! Proves:
//! 1. Repeated in-process runs produce byte-identical audit graphs
//! 2. Pop order is non-decreasing in `f_cost` under a consistent heuristic
//! 3. Each `(position, keys)` state is expanded at most once
//! 4. Solution-path flags agree with the returned plan
//! 5. The expansion budget stops the search without a false "no solution"
//! 6. Graph metadata binds the policy digest and heuristic id

use std::collections::BTreeSet;

use lock_tests::corpus::case;
use waypoint_harness::worlds::grid_maze::{FarthestKeyManhattan, GridMaze};
use waypoint_search::error::SearchError;
use waypoint_search::graph::{PopOutcomeV1, TerminationReasonV1};
use waypoint_search::heuristic::{HeuristicV1, ZeroHeuristic};
use waypoint_search::policy::{ExpansionLogV1, SearchPolicyV1};
use waypoint_search::search::{search, solve_with};

fn full_log() -> SearchPolicyV1 {
    SearchPolicyV1 {
        expansion_log: ExpansionLogV1::Full,
        ..SearchPolicyV1::default()
    }
}

// ---------------------------------------------------------------------------
// 1. In-process determinism
// ---------------------------------------------------------------------------

#[test]
fn graph_bytes_deterministic_n10() {
    let maze = case("warren").unwrap().maze();
    let policy = full_log();
    let first = search(&maze, &policy, &ZeroHeuristic)
        .unwrap()
        .to_graph()
        .unwrap()
        .to_canonical_json_bytes()
        .unwrap();
    for i in 1..10 {
        let other = search(&maze, &policy, &ZeroHeuristic)
            .unwrap()
            .to_graph()
            .unwrap()
            .to_canonical_json_bytes()
            .unwrap();
        assert_eq!(first, other, "graph bytes differed on run {i}");
    }
}

#[test]
fn plans_deterministic_across_fresh_mazes() {
    let policy = SearchPolicyV1::default();
    let c = case("mud_moat_open_top").unwrap();
    let first = solve_with(&c.maze(), &policy, &ZeroHeuristic).unwrap();
    for _ in 1..10 {
        assert_eq!(first, solve_with(&c.maze(), &policy, &ZeroHeuristic).unwrap());
    }
}

// ---------------------------------------------------------------------------
// 2-3. Pop discipline
// ---------------------------------------------------------------------------

#[test]
fn pops_are_cost_ordered_and_states_expand_once() {
    let maze = case("switchback").unwrap().maze();
    for heuristic in [
        &ZeroHeuristic as &dyn HeuristicV1<GridMaze>,
        &FarthestKeyManhattan as &dyn HeuristicV1<GridMaze>,
    ] {
        let result = search(&maze, &full_log(), heuristic).unwrap();
        assert!(result.is_goal_reached());
        assert_eq!(result.expansions.len() as u64, result.stats.pops);

        let mut last_f = 0;
        let mut expanded = BTreeSet::new();
        for (i, event) in result.expansions.iter().enumerate() {
            assert_eq!(event.pop_order, i as u64);
            assert!(
                event.frontier_pop_key.f_cost >= last_f,
                "pop {i} went backwards in f_cost under {}",
                heuristic.heuristic_id()
            );
            last_f = event.frontier_pop_key.f_cost;

            let node = &result.nodes[usize::try_from(event.node_id).unwrap()];
            match event.outcome {
                PopOutcomeV1::Expanded { .. } => {
                    assert!(
                        expanded.insert(node.state_key()),
                        "state at {} expanded twice",
                        node.position
                    );
                }
                PopOutcomeV1::DuplicateSuppressed => {
                    assert!(expanded.contains(&node.state_key()));
                }
                PopOutcomeV1::GoalReached => {
                    assert_eq!(i + 1, result.expansions.len(), "goal pop must be last");
                }
            }
        }
        assert_eq!(expanded.len() as u64, result.stats.expansions);
    }
}

// ---------------------------------------------------------------------------
// 4. Solution path
// ---------------------------------------------------------------------------

#[test]
fn solution_path_flags_match_plan() {
    let maze = case("crossroads_bypass").unwrap().maze();
    let result = search(&maze, &full_log(), &ZeroHeuristic).unwrap();
    let plan = result.plan().unwrap();
    let graph = result.to_graph().unwrap();

    let on_path: Vec<_> = graph
        .node_summaries
        .iter()
        .filter(|s| s.is_on_solution_path)
        .collect();
    assert_eq!(on_path.len(), plan.len() + 1);
    assert_eq!(graph.node_summaries.iter().filter(|s| s.is_goal).count(), 1);

    let goal = on_path.iter().find(|s| s.is_goal).unwrap();
    assert_eq!(goal.g_cost, 18);
    assert_eq!(goal.collected_keys.len(), 3);
    assert_eq!(Some(goal.g_cost), result.path_cost());
}

// ---------------------------------------------------------------------------
// 5. Budget
// ---------------------------------------------------------------------------

#[test]
fn exact_budget_reaches_goal_and_one_less_does_not() {
    let maze = case("mud_field").unwrap().maze();
    let unbounded = search(&maze, &SearchPolicyV1::default(), &ZeroHeuristic).unwrap();
    assert!(unbounded.is_goal_reached());
    let needed = unbounded.stats.expansions;

    let exact = SearchPolicyV1 {
        max_expansions: needed,
        ..SearchPolicyV1::default()
    };
    let plan = solve_with(&maze, &exact, &ZeroHeuristic).unwrap();
    assert_eq!(plan, unbounded.plan());

    let short = SearchPolicyV1 {
        max_expansions: needed - 1,
        ..SearchPolicyV1::default()
    };
    let stopped = search(&maze, &short, &ZeroHeuristic).unwrap();
    assert_eq!(
        stopped.termination_reason,
        TerminationReasonV1::ExpansionBudgetExceeded
    );
    assert_eq!(stopped.stats.expansions, needed - 1);
    assert_eq!(
        solve_with(&maze, &short, &ZeroHeuristic),
        Err(SearchError::ExpansionBudgetExceeded {
            expansions: needed - 1
        })
    );
}

#[test]
fn budget_does_not_mask_exhaustion() {
    let maze = case("sealed_pocket").unwrap().maze();
    let result = search(&maze, &SearchPolicyV1::default(), &ZeroHeuristic).unwrap();
    assert_eq!(
        result.termination_reason,
        TerminationReasonV1::FrontierExhausted
    );
    let generous = SearchPolicyV1 {
        max_expansions: result.stats.expansions,
        ..SearchPolicyV1::default()
    };
    assert_eq!(solve_with(&maze, &generous, &ZeroHeuristic), Ok(None));
}

#[test]
fn zero_budget_is_rejected_before_search() {
    let maze = case("loop_three_keys").unwrap().maze();
    let policy = SearchPolicyV1 {
        max_expansions: 0,
        ..SearchPolicyV1::default()
    };
    assert!(matches!(
        search(&maze, &policy, &ZeroHeuristic),
        Err(SearchError::InvalidPolicy { .. })
    ));
}

// ---------------------------------------------------------------------------
// 6. Metadata binding
// ---------------------------------------------------------------------------

#[test]
fn metadata_binds_policy_and_heuristic() {
    let maze = case("ring_corridor").unwrap().maze();
    let policy = full_log();
    let graph = search(&maze, &policy, &FarthestKeyManhattan)
        .unwrap()
        .to_graph()
        .unwrap();
    assert_eq!(graph.metadata.heuristic_id, "farthest_key_manhattan");
    assert_eq!(
        graph.metadata.search_policy_digest,
        policy.digest().unwrap().as_str()
    );
    assert_eq!(graph.metadata.key_count, 3);
    assert_eq!(graph.metadata.expansion_log, ExpansionLogV1::Full);

    let json: serde_json::Value =
        serde_json::from_slice(&graph.to_canonical_json_bytes().unwrap()).unwrap();
    assert_eq!(
        json["metadata"]["termination_reason"]["type"],
        "goal_reached"
    );
    assert_eq!(json["metadata"]["heuristic_id"], "farthest_key_manhattan");
}

#[test]
fn log_off_keeps_counters_but_no_events() {
    let maze = case("ring_corridor").unwrap().maze();
    let result = search(&maze, &SearchPolicyV1::default(), &ZeroHeuristic).unwrap();
    assert!(result.expansions.is_empty());
    let graph = result.to_graph().unwrap();
    assert!(graph.expansions.is_empty());
    assert!(graph.metadata.total_pops > 0);
    assert_eq!(graph.metadata.expansion_log, ExpansionLogV1::Off);
}

#[test]
fn different_policies_give_different_graph_digests() {
    let maze = case("ring_corridor").unwrap().maze();
    let off = search(&maze, &SearchPolicyV1::default(), &ZeroHeuristic)
        .unwrap()
        .to_graph()
        .unwrap()
        .digest()
        .unwrap();
    let full = search(&maze, &full_log(), &ZeroHeuristic)
        .unwrap()
        .to_graph()
        .unwrap()
        .digest()
        .unwrap();
    assert_ne!(off, full);
}
