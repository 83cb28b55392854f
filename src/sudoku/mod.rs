#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving 9x9 Sudoku puzzles.

/// The `board` module contains the 9x9 grid model and its constraint checks.
pub mod board;

/// The `parser` module reads puzzle grids from text input.
pub mod parser;

/// The `solver` module contains the backtracking search engine and its wall-clock budget.
pub mod solver;
