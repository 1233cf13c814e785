//! Waypoint Harness: fixture worlds and independent checkers for the search.
//!
//! The harness owns everything the search layer deliberately does not:
//! a concrete grid maze, replay of a plan against a maze, and a brute-force
//! oracle for the optimal cost. Lock tests and benchmarks depend on it; the
//! search crate never does.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod oracle;
pub mod replay;
pub mod worlds;
