//! Binary that solves a fixed set of corpus mazes and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: one block of key=value lines per maze (see source for format).

use lock_tests::corpus::case;
use waypoint_harness::worlds::grid_maze::{FarthestKeyManhattan, GridMaze};
use waypoint_search::heuristic::{HeuristicV1, ZeroHeuristic};
use waypoint_search::policy::{ExpansionLogV1, SearchPolicyV1};
use waypoint_search::search::search;

const MAZES: [&str; 3] = ["warren", "switchback", "mud_moat_capped"];

fn main() {
    let policy = SearchPolicyV1 {
        expansion_log: ExpansionLogV1::Full,
        ..SearchPolicyV1::default()
    };
    println!(
        "policy_digest={}",
        policy.digest().expect("policy digest").as_str()
    );

    for name in MAZES {
        let maze = case(name).expect("corpus maze").maze();
        let heuristics: [(&str, &dyn HeuristicV1<GridMaze>); 2] =
            [("zero", &ZeroHeuristic), ("manhattan", &FarthestKeyManhattan)];
        for (label, heuristic) in heuristics {
            let result = search(&maze, &policy, heuristic).expect("search run failed");
            let graph = result.to_graph().expect("graph build failed");
            let plan = result.plan().map_or_else(
                || "none".to_string(),
                |p| p.iter().map(ToString::to_string).collect::<String>(),
            );
            let cost = result
                .path_cost()
                .map_or_else(|| "none".to_string(), |c| c.to_string());
            let graph_json: serde_json::Value = serde_json::from_slice(
                &graph.to_canonical_json_bytes().expect("graph serialization failed"),
            )
            .expect("invalid graph JSON");
            let term = graph_json["metadata"]["termination_reason"]["type"]
                .as_str()
                .expect("missing termination_reason.type");

            println!("[{name}/{label}]");
            println!("plan={plan}");
            println!("cost={cost}");
            println!("termination_reason={term}");
            println!("total_pops={}", graph.metadata.total_pops);
            println!("total_expansions={}", graph.metadata.total_expansions);
            println!(
                "search_graph_digest={}",
                graph.digest().expect("graph digest").as_str()
            );
        }
    }
}
