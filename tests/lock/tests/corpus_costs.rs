//! Corpus lock tests: every reference maze is solved soundly and optimally.
//!
//! Soundness is checked by replaying the returned plan; optimality by
//! comparing the replayed cost against the recorded cost and against the
//! brute-force oracle.

use std::collections::BTreeSet;

use lock_tests::corpus::{case, corner_field, diagonal_field, CASES};
use waypoint_harness::oracle::optimal_cost;
use waypoint_harness::replay::{replay_plan, ReplayError};
use waypoint_harness::worlds::grid_maze::{GridCell, GridMaze};
use waypoint_search::contract::MazeModelV1;
use waypoint_search::search::solve;

fn assert_solves(name: &str, maze: &GridMaze, expected: Option<u64>) {
    let plan = solve(maze);
    match expected {
        Some(cost) => {
            let report = replay_plan(maze, plan.as_deref())
                .unwrap_or_else(|e| panic!("{name}: plan is not a solution: {e}"));
            assert_eq!(report.cost, cost, "{name}: plan is suboptimal");
            assert_eq!(
                report.keys_visited,
                maze.key_positions().len(),
                "{name}: not every key visited"
            );
        }
        None => {
            assert!(plan.is_none(), "{name}: returned a plan where none exists");
            assert_eq!(replay_plan(maze, plan.as_deref()), Err(ReplayError::NoPlan));
        }
    }
}

// ---------------------------------------------------------------------------
// Hand-drawn corpus
// ---------------------------------------------------------------------------

#[test]
fn corpus_plans_are_sound_and_optimal() {
    for c in CASES {
        assert_solves(c.name, &c.maze(), c.expected_cost);
    }
}

#[test]
fn corpus_costs_match_oracle() {
    for c in CASES {
        assert_eq!(
            optimal_cost(&c.maze()),
            c.expected_cost,
            "{}: recorded cost disagrees with the oracle",
            c.name
        );
    }
}

#[test]
fn key_numbering_does_not_change_cost() {
    let a = case("loop_three_keys").unwrap();
    let b = case("loop_three_keys_renumbered").unwrap();
    let cost = |m: &GridMaze| replay_plan(m, solve(m).as_deref()).unwrap().cost;
    assert_eq!(cost(&a.maze()), cost(&b.maze()));
}

#[test]
fn keys_in_a_row_are_collected_in_one_sweep() {
    let maze = case("single_row_keys_ahead").unwrap().maze();
    let plan = solve(&maze).unwrap();
    let labels: Vec<String> = plan.iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["R", "R", "R"]);
}

// ---------------------------------------------------------------------------
// Open fields
// ---------------------------------------------------------------------------

#[test]
fn open_field_corner_keys() {
    let maze = corner_field(102, &BTreeSet::new(), &BTreeSet::new()).unwrap();
    assert_solves("open_field_corner_keys", &maze, Some(297));
}

#[test]
fn open_field_mud_before_each_key() {
    let mud = BTreeSet::from([
        GridCell::new(99, 1),
        GridCell::new(99, 100),
        GridCell::new(1, 99),
    ]);
    let maze = corner_field(102, &mud, &BTreeSet::new()).unwrap();
    assert_solves("open_field_mud_before_each_key", &maze, Some(301));
}

#[test]
fn open_field_walled_off_corner() {
    let walls = BTreeSet::from([GridCell::new(99, 1), GridCell::new(100, 2)]);
    let maze = corner_field(102, &BTreeSet::new(), &walls).unwrap();
    assert_solves("open_field_walled_off_corner", &maze, None);
}

#[test]
fn open_field_far_diagonal() {
    let maze = diagonal_field(502).unwrap();
    assert_solves("open_field_far_diagonal", &maze, Some(998));
}

// ---------------------------------------------------------------------------
// Degenerate mazes
// ---------------------------------------------------------------------------

#[test]
fn keyless_maze_has_empty_plan() {
    let maze = GridMaze::parse(&["XXXX", "XI.X", "XXXX"]).unwrap();
    assert_eq!(solve(&maze), Some(Vec::new()));
}

#[test]
fn single_adjacent_key_costs_one_step() {
    let keys = BTreeSet::from([GridCell::new(2, 1)]);
    let maze = GridMaze::open_field(
        4,
        3,
        GridCell::new(1, 1),
        &keys,
        &BTreeSet::new(),
        &BTreeSet::new(),
    )
    .unwrap();
    assert_solves("single_adjacent_key", &maze, Some(1));
}

#[test]
fn boxed_in_start_with_keys_has_no_plan() {
    let maze = GridMaze::parse(&["XXXXX", "XIX1X", "XXXXX"]).unwrap();
    assert_solves("boxed_in_start", &maze, None);
}
