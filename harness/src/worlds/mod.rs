//! Maze fixtures for the search layer.

pub mod grid_maze;
