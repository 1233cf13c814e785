//! Brute-force optimal cost, independent of the search layer.
//!
//! Runs Dijkstra from the initial position and from every key cell, then
//! takes the cheapest ordering of keys over the pairwise distances. Any walk
//! that collects every key visits them in some first-visit order, and each
//! leg costs at least the shortest distance between its endpoints, so the
//! best ordering is the true optimum.
//!
//! Cost is `O(k · n log n + k!)` for `k` keys; meant for small mazes.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use waypoint_search::contract::MazeModelV1;

/// Shortest entry-cost distance from `source` to every reachable cell.
pub fn distances_from<M: MazeModelV1 + ?Sized>(
    model: &M,
    source: &M::Position,
) -> BTreeMap<M::Position, u64> {
    let mut dist: BTreeMap<M::Position, u64> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    dist.insert(source.clone(), 0);
    heap.push(Reverse((0u64, source.clone())));

    while let Some(Reverse((d, position))) = heap.pop() {
        if dist.get(&position).is_some_and(|&best| d > best) {
            continue;
        }
        for next in model.transitions_from(&position).into_values() {
            let candidate = d.saturating_add(model.step_cost(&next));
            let improves = match dist.get(&next) {
                Some(&best) => candidate < best,
                None => true,
            };
            if improves {
                dist.insert(next.clone(), candidate);
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    dist
}

/// Minimum total cost of visiting every key cell from the initial position.
///
/// Returns `None` if some key cell is unreachable.
pub fn optimal_cost<M: MazeModelV1 + ?Sized>(model: &M) -> Option<u64> {
    let start = model.initial_position();
    let keys: Vec<M::Position> = model.key_positions().into_iter().collect();

    let from_start = distances_from(model, &start);
    let start_legs: Vec<u64> = keys
        .iter()
        .map(|k| from_start.get(k).copied())
        .collect::<Option<_>>()?;

    let key_legs: Vec<Vec<Option<u64>>> = keys
        .iter()
        .map(|k| {
            let dist = distances_from(model, k);
            keys.iter().map(|other| dist.get(other).copied()).collect()
        })
        .collect();

    if keys.is_empty() {
        return Some(0);
    }

    let mut best: Option<u64> = None;
    let mut remaining: Vec<usize> = (0..keys.len()).collect();
    for first in 0..keys.len() {
        remaining.retain(|&i| i != first);
        cheapest_tour(&key_legs, first, start_legs[first], &mut remaining, &mut best);
        remaining.push(first);
        remaining.sort_unstable();
    }
    best
}

fn cheapest_tour(
    legs: &[Vec<Option<u64>>],
    at: usize,
    cost: u64,
    remaining: &mut Vec<usize>,
    best: &mut Option<u64>,
) {
    if best.is_some_and(|b| cost >= b) {
        return;
    }
    if remaining.is_empty() {
        *best = Some(cost);
        return;
    }
    for slot in 0..remaining.len() {
        let next = remaining.remove(slot);
        if let Some(leg) = legs[at][next] {
            cheapest_tour(legs, next, cost.saturating_add(leg), remaining, best);
        }
        remaining.insert(slot, next);
    }
}
