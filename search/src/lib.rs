//! Waypoint Search: deterministic uniform-cost search for multi-key mazes.
//!
//! This crate provides the search layer. It knows nothing about grids,
//! terrain glyphs or file formats: a maze is anything implementing
//! [`MazeModelV1`](contract::MazeModelV1).
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_search  ←  waypoint_harness  ←  lock-tests / benchmarks
//! (frontier, nodes)   (grid fixture, replay, oracle)
//! ```
//!
//! # Key types
//!
//! - [`SearchNodeV1`](node::SearchNodeV1) — immutable arena node with key-collection progress
//! - [`StateKeyV1`](node::StateKeyV1) — `(position, collected keys)` dedup identity
//! - [`BestFirstFrontier`](frontier::BestFirstFrontier) — cost-ordered frontier + visited record
//! - [`SearchPolicyV1`](policy::SearchPolicyV1) — expansion budget and audit configuration
//! - [`HeuristicV1`](heuristic::HeuristicV1) — optional consistent estimate (zero by default)
//! - [`SearchGraphV1`](graph::SearchGraphV1) — canonical JSON audit trail
//!
//! The entry points are [`search::solve`], [`search::solve_with`] and
//! [`search::search`].

#![forbid(unsafe_code)]

pub mod canon;
pub mod contract;
pub mod digest;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod search;
