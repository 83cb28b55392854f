//! # `sudoku_solver`
//!
//! A command-line Sudoku solver. Grids arrive as plain-text files (nine lines
//! of nine characters, digits for givens, anything else for a blank) and are
//! solved by backtracking search under a wall-clock budget.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a single grid file
//! sudoku_solver puzzle.sdku
//!
//! # Equivalent explicit form, with a 5 second budget and statistics
//! sudoku_solver file --path puzzle.sdku --timeout 5 --stats
//!
//! # Solve a grid given inline
//! sudoku_solver text --input "$(cat puzzle.sdku)"
//!
//! # Solve every .sdku/.txt file under a directory
//! sudoku_solver dir --path puzzles/
//! ```
//!
//! Exit status is `0` when the puzzle was solved and `1` for any rejection
//! (malformed or inadmissible input), an unsolvable puzzle, or a timeout.

use clap::Parser;

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = command_line::cli::Cli::parse();

    if let Err(e) = command_line::cli::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
