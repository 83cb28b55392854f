#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_solver::sudoku::board::Board;
use sudoku_solver::sudoku::parser::{parse_grid, parse_grid_file};
use sudoku_solver::sudoku::solver::{Budget, SearchOutcome, solve};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the Sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_solver", version, about = "A backtracking Sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a `.sdku`/`.txt` grid file, or to a
    /// directory of such files to solve in batch.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the Sudoku solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single grid file.
    File {
        /// Path to the `.sdku`/`.txt` grid file. The format is defined by
        /// `sudoku::parser::parse_grid_file`: nine lines of nine characters,
        /// digits for givens and any other character for a blank.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a grid provided as plain text.
    Text {
        /// Literal grid input as a string: nine newline-separated lines of
        /// nine characters.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every grid file in a directory.
    Dir {
        /// Path to a directory, walked recursively for `.sdku`/`.txt` files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Wall-clock budget for the search, in seconds. Must be at least 1.
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) timeout: u64,

    /// Enable printing of timing and memory statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Suppress printing of the initial and solved grids.
    #[arg(short, long, default_value_t = false)]
    pub(crate) quiet: bool,
}

/// Dispatches the parsed command line to the matching handler.
pub(crate) fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => {
            let (board, parse_time) = timed(|| parse_grid(Cursor::new(input)));
            let board = board.map_err(|e| e.to_string())?;
            solve_board(board, None, parse_time, &common)
        }
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "sudoku_solver",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => match cli.path {
            Some(path) if path.is_dir() => solve_dir(&path, &cli.common),
            Some(path) => solve_file(&path, &cli.common),
            None => Err(String::from(
                "no command provided, use --help for more information",
            )),
        },
    }
}

/// Parses and solves a single grid file.
fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let (board, parse_time) = timed(|| parse_grid_file(path));
    let board = board.map_err(|e| e.to_string())?;
    solve_board(board, Some(path), parse_time, common)
}

/// Walks a directory and solves every `.sdku`/`.txt` file in it.
///
/// Files that fail to parse or to solve are reported on stderr and do not
/// abort the walk.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }

        let supported = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("sdku") || ext.eq_ignore_ascii_case("txt"));
        if !supported {
            continue;
        }

        if let Err(e) = solve_file(file_path, common) {
            eprintln!("{}: {e}", file_path.display());
        }
    }

    Ok(())
}

/// Gates the board through the admissibility check, runs the search under the
/// configured budget, and reports the outcome.
///
/// An inadmissible board is a rejection, not a search failure: the solver is
/// never invoked for it.
fn solve_board(
    mut board: Board,
    label: Option<&Path>,
    parse_time: Duration,
    common: &CommonOptions,
) -> Result<(), String> {
    if let Some(path) = label {
        println!("Solving: {}", path.display());
    }

    if !common.quiet {
        println!("Initial board:\n{board}");
    }

    if !board.is_fully_valid() {
        return Err(String::from(
            "invalid Sudoku board: duplicate digit in a row, column or box",
        ));
    }

    if board.is_complete() {
        println!("Board is already solved.");
        return Ok(());
    }

    let budget = Budget::with_timeout(Duration::from_secs(common.timeout));
    let (outcome, solve_time) = timed(|| solve(&mut board, &budget));

    if common.stats {
        print_stats(parse_time, solve_time);
    }

    match outcome {
        SearchOutcome::Solved => {
            if !common.quiet {
                println!("Solved board:\n{board}");
            }
            Ok(())
        }
        SearchOutcome::Unsolvable => Err(String::from("no solution exists")),
        SearchOutcome::TimedOut => Err(format!(
            "solver timed out after {} second(s)",
            common.timeout
        )),
    }
}

/// Runs `f` and returns its result together with its wall-clock duration.
fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Prints phase timings and jemalloc memory statistics.
fn print_stats(parse_time: Duration, solve_time: Duration) {
    println!("Parse time: {parse_time:?}");
    println!("Solve time: {solve_time:?}");

    // Advance the epoch so the allocator counters reflect the solving phase.
    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    println!(
        "Memory allocated: {:.2} MiB",
        allocated_bytes as f64 / (1024.0 * 1024.0)
    );
    println!(
        "Memory resident: {:.2} MiB",
        resident_bytes as f64 / (1024.0 * 1024.0)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_solver::sudoku::board::EXAMPLE;

    fn quiet_options() -> CommonOptions {
        CommonOptions {
            timeout: 10,
            stats: false,
            quiet: true,
        }
    }

    #[test]
    fn test_already_complete_board_is_reported_without_search() {
        let mut board = Board::from(EXAMPLE);
        assert!(solve(&mut board, &Budget::unlimited()).is_solved());

        // A complete board short-circuits before a budget is even created.
        let result = solve_board(board, None, Duration::ZERO, &quiet_options());
        assert!(result.is_ok());
    }

    #[test]
    fn test_inadmissible_board_is_rejected_before_search() {
        let mut board = Board::from(EXAMPLE);
        // Duplicate the 7 already present in row 0.
        board.set(0, 6, 7);

        let result = solve_board(board, None, Duration::ZERO, &quiet_options());
        assert!(result.is_err());
    }
}
