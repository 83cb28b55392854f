#![deny(missing_docs)]
//! This crate solves 9x9 Sudoku puzzles using backtracking search with constraint pruning,
//! bounded by a cooperative wall-clock budget.

/// The `sudoku` module implements the Sudoku engine: the board model and its
/// constraint checks, the grid-file parser, and the backtracking solver.
pub mod sudoku;
