//! Shared maze regimes for the waypoint benchmark suites.
//!
//! Each regime stresses one part of the driver. Mud lattices force many
//! re-pushes at differing costs; sealed fields exhaust the whole state space.

use std::collections::BTreeSet;

use waypoint_harness::worlds::grid_maze::{GridAction, GridCell, GridMaze};
use waypoint_search::heuristic::HeuristicV1;
use waypoint_search::policy::SearchPolicyV1;
use waypoint_search::search::{search, SearchResult};

/// A maze plus the policy it is searched under.
pub struct Regime {
    pub maze: GridMaze,
    pub policy: SearchPolicyV1,
}

fn corner_keys(size: u32) -> BTreeSet<GridCell> {
    let far = size - 2;
    BTreeSet::from([
        GridCell::new(far, 1),
        GridCell::new(far, far),
        GridCell::new(1, far),
    ])
}

fn field(size: u32, mud: &BTreeSet<GridCell>, walls: &BTreeSet<GridCell>) -> GridMaze {
    GridMaze::open_field(size, size, GridCell::new(1, 1), &corner_keys(size), mud, walls)
        .expect("benchmark field is well-formed")
}

/// Open field with keys in three corners. No obstacles.
///
/// # Panics
///
/// Panics if `size < 5`. Benchmark setup failures are fatal.
#[must_use]
pub fn regime_open_field(size: u32) -> Regime {
    Regime {
        maze: field(size, &BTreeSet::new(), &BTreeSet::new()),
        policy: SearchPolicyV1::default(),
    }
}

/// Open field with mud on every interior cell whose coordinates sum to a
/// multiple of three.
///
/// # Panics
///
/// Panics if `size < 5`.
#[must_use]
pub fn regime_mud_lattice(size: u32) -> Regime {
    let mud = (1..size - 1)
        .flat_map(|row| (1..size - 1).map(move |col| GridCell::new(col, row)))
        .filter(|c| (c.col + c.row) % 3 == 0)
        .collect();
    Regime {
        maze: field(size, &mud, &BTreeSet::new()),
        policy: SearchPolicyV1::default(),
    }
}

/// Open field whose far-right key is walled off: the search must exhaust
/// every reachable `(cell, key subset)` state before reporting no plan.
///
/// # Panics
///
/// Panics if `size < 5`.
#[must_use]
pub fn regime_sealed_corner(size: u32) -> Regime {
    let far = size - 2;
    let walls = BTreeSet::from([GridCell::new(far - 1, 1), GridCell::new(far, 2)]);
    Regime {
        maze: field(size, &BTreeSet::new(), &walls),
        policy: SearchPolicyV1::default(),
    }
}

/// Open field searched under a budget far below what a verdict needs.
///
/// # Panics
///
/// Panics if `size < 5`.
#[must_use]
pub fn regime_budget_limited(size: u32) -> Regime {
    Regime {
        maze: field(size, &BTreeSet::new(), &BTreeSet::new()),
        policy: SearchPolicyV1 {
            max_expansions: u64::from(size),
            ..SearchPolicyV1::default()
        },
    }
}

/// Run the search engine only, panicking on pre-flight errors.
///
/// # Panics
///
/// Panics if the regime's policy fails validation.
pub fn run_search_only(
    regime: &Regime,
    heuristic: &dyn HeuristicV1<GridMaze>,
) -> SearchResult<GridCell, GridAction> {
    search(&regime.maze, &regime.policy, heuristic).expect("regime policy is valid")
}
