#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for plain-text Sudoku grid files.
//!
//! The expected format is exactly nine lines of exactly nine characters each.
//! ASCII digits map to their value and any other character maps to `0`
//! (blank), so `.` or `-` placeholders are accepted. Lines beginning with `#`
//! are rejected as malformed input: they would silently shift the grid by a
//! row, so no comment syntax is supported.
//!
//! Parsing only establishes the structural invariant of the grid. The
//! semantic admissibility check ([`Board::is_fully_valid`]) is the caller's
//! gate, run before any solve.

use crate::sudoku::board::{Board, SIZE};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Errors produced while reading a grid from text input.
#[derive(Debug)]
pub enum ParseGridError {
    /// The file path did not end in `.sdku` or `.txt`.
    UnsupportedExtension(String),
    /// The input did not contain exactly nine lines.
    WrongRowCount(usize),
    /// A line did not contain exactly nine characters. Fields are the
    /// one-based line number and the length found.
    WrongRowLength {
        /// One-based line number of the offending line.
        line: usize,
        /// Number of characters found on that line.
        len: usize,
    },
    /// A line started with `#`. Carries the one-based line number.
    CommentLine(usize),
    /// The underlying reader failed.
    Io(io::Error),
}

impl Display for ParseGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedExtension(path) => {
                write!(f, "unsupported file format: {path} (expected .sdku or .txt)")
            }
            Self::WrongRowCount(count) => {
                write!(f, "grid must contain {SIZE} lines, found {count}")
            }
            Self::WrongRowLength { line, len } => {
                write!(f, "line {line} must contain {SIZE} characters, found {len}")
            }
            Self::CommentLine(line) => {
                write!(f, "line {line} starts with '#': comment lines are not supported")
            }
            Self::Io(e) => write!(f, "failed to read grid: {e}"),
        }
    }
}

impl std::error::Error for ParseGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseGridError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses a grid from a `BufRead` source.
///
/// # Errors
///
/// Returns [`ParseGridError`] when the input has the wrong shape, contains a
/// `#`-prefixed line, or the reader fails.
pub fn parse_grid<R: BufRead>(reader: R) -> Result<Board, ParseGridError> {
    let lines: Vec<String> = reader.lines().collect::<io::Result<_>>()?;
    if lines.len() != SIZE {
        return Err(ParseGridError::WrongRowCount(lines.len()));
    }

    let mut cells = [[0; SIZE]; SIZE];
    for (row, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.starts_with('#') {
            return Err(ParseGridError::CommentLine(row + 1));
        }

        let len = line.chars().count();
        if len != SIZE {
            return Err(ParseGridError::WrongRowLength { line: row + 1, len });
        }

        for (col, ch) in line.chars().enumerate() {
            cells[row][col] = ch
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .unwrap_or(0);
        }
    }

    Ok(Board::from(cells))
}

/// Parses a grid file specified by its path.
///
/// This is a convenience function that checks the extension, opens the file,
/// wraps it in a `BufReader`, and then calls [`parse_grid`].
///
/// # Errors
///
/// Returns [`ParseGridError::UnsupportedExtension`] for anything other than
/// `.sdku` or `.txt` (case-insensitive), plus everything [`parse_grid`]
/// returns.
pub fn parse_grid_file<P: AsRef<Path>>(path: P) -> Result<Board, ParseGridError> {
    let path = path.as_ref();
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sdku") || ext.eq_ignore_ascii_case("txt"));

    if !supported {
        return Err(ParseGridError::UnsupportedExtension(
            path.display().to_string(),
        ));
    }

    let file = File::open(path)?;
    parse_grid(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXAMPLE_TEXT: &str = "530070000\n\
                                600195000\n\
                                098000060\n\
                                800060003\n\
                                400803001\n\
                                700020006\n\
                                060000280\n\
                                000419005\n\
                                000080079";

    #[test]
    fn test_parse_example_grid() {
        let board = parse_grid(Cursor::new(EXAMPLE_TEXT)).unwrap();
        assert_eq!(board, Board::from(crate::sudoku::board::EXAMPLE));
    }

    #[test]
    fn test_non_digit_characters_map_to_blank() {
        let text = "53..7....\n\
                    6..195...\n\
                    .98....6.\n\
                    8...6...3\n\
                    4..8.3..1\n\
                    7...2...6\n\
                    .6....28.\n\
                    ...419..5\n\
                    ....8..79";
        let board = parse_grid(Cursor::new(text)).unwrap();
        assert_eq!(board, Board::from(crate::sudoku::board::EXAMPLE));
    }

    #[test]
    fn test_rejects_wrong_line_count() {
        let text = "530070000\n600195000";
        match parse_grid(Cursor::new(text)) {
            Err(ParseGridError::WrongRowCount(2)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_short_line() {
        let text = EXAMPLE_TEXT.replace("098000060", "0980");
        match parse_grid(Cursor::new(text)) {
            Err(ParseGridError::WrongRowLength { line: 3, len: 4 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_comment_line() {
        let text = EXAMPLE_TEXT.replace("800060003", "# comment");
        match parse_grid(Cursor::new(text)) {
            Err(ParseGridError::CommentLine(4)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        match parse_grid_file("puzzle.png") {
            Err(ParseGridError::UnsupportedExtension(_)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
