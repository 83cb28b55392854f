#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Command-line front end for the Sudoku solver binary.

pub(crate) mod cli;
