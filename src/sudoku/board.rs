#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 9x9 Sudoku board model and its constraint checks.
//!
//! A [`Board`] is a fixed 9x9 grid of digits in `0..=9`, where `0` denotes a
//! blank cell. The board offers the three predicates the search engine is
//! built on:
//!
//! 1. **Placement check** ([`Board::is_placement_valid`]): is a digit legal at
//!    a given cell, judged against its row, column and 3x3 box? This is the
//!    cheap per-candidate check the solver calls at every step of the search.
//! 2. **Blank scan** ([`Board::find_next_blank`]): the first empty cell in
//!    row-major order. Row-major order is a commitment, not an accident: it
//!    fixes the search order and therefore which solution is returned when a
//!    puzzle has several.
//! 3. **Full validity** ([`Board::is_fully_valid`]): does the whole grid obey
//!    the Sudoku rules? This is the admissibility gate run once before a solve
//!    ever starts; it is never re-run during the search.

use bit_vec::BitVec;
use itertools::Itertools;
use std::fmt::Display;

/// The number of rows (and columns) of a board.
pub const SIZE: usize = 9;

/// The edge length of a 3x3 box.
const BOX: usize = 3;

/// A classic 9x9 puzzle with a unique solution, used by benchmarks, tests and
/// the documentation examples.
pub const EXAMPLE: [[u8; SIZE]; SIZE] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// Errors produced when constructing a [`Board`] from external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The input did not have exactly nine rows. Carries the row count found.
    WrongRowCount(usize),
    /// A row did not have exactly nine cells.
    WrongRowLength {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of cells found in that row.
        len: usize,
    },
    /// A cell held a value outside `0..=9`.
    DigitOutOfRange {
        /// Zero-based row of the offending cell.
        row: usize,
        /// Zero-based column of the offending cell.
        col: usize,
        /// The out-of-range value.
        value: u8,
    },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongRowCount(count) => {
                write!(f, "board must contain {SIZE} rows, found {count}")
            }
            Self::WrongRowLength { row, len } => {
                write!(f, "row {row} must contain {SIZE} cells, found {len}")
            }
            Self::DigitOutOfRange { row, col, value } => {
                write!(f, "cell ({row}, {col}) holds {value}, expected 0..=9")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// A 9x9 Sudoku grid. `0` denotes a blank cell.
///
/// The board is created from external input as a snapshot, handed to the
/// solver, and mutated in place during search; after a successful solve the
/// same storage holds the completed grid. Digits are expected to lie in
/// `0..=9` — the fallible [`TryFrom`] constructor enforces this for untrusted
/// data, while [`From`] is reserved for trusted literal grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board([[u8; SIZE]; SIZE]);

impl Board {
    /// Creates a board with every cell blank.
    #[must_use]
    pub const fn empty() -> Self {
        Self([[0; SIZE]; SIZE])
    }

    /// Returns the underlying cells.
    #[must_use]
    pub const fn cells(&self) -> &[[u8; SIZE]; SIZE] {
        &self.0
    }

    /// Returns the digit at `(row, col)`; `0` means blank.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is not in `0..9`.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    /// Writes `digit` at `(row, col)`. Writing `0` clears the cell; this is
    /// the undo operation of the backtracking search.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is not in `0..9`.
    pub const fn set(&mut self, row: usize, col: usize, digit: u8) {
        debug_assert!(digit <= 9, "digit out of range");
        self.0[row][col] = digit;
    }

    /// Checks whether placing `digit` at `(row, col)` is legal: the digit must
    /// not occur elsewhere in the row, elsewhere in the column, or elsewhere
    /// in the containing 3x3 box. The probed cell itself is excluded from the
    /// comparison, so re-validating a digit already on the board works.
    ///
    /// Blanks are never placed; probing with `digit == 0` is a caller bug.
    ///
    /// This is the dominant cost of the search — at most 9+9+9 comparisons,
    /// called once per candidate digit per visited cell.
    #[must_use]
    pub fn is_placement_valid(&self, row: usize, col: usize, digit: u8) -> bool {
        debug_assert!((1..=9).contains(&digit), "digit out of range");

        for i in 0..SIZE {
            if self.0[row][i] == digit && i != col {
                return false;
            }
            if self.0[i][col] == digit && i != row {
                return false;
            }
        }

        let box_row = (row / BOX) * BOX;
        let box_col = (col / BOX) * BOX;
        for r in box_row..box_row + BOX {
            for c in box_col..box_col + BOX {
                if self.0[r][c] == digit && (r != row || c != col) {
                    return false;
                }
            }
        }

        true
    }

    /// Returns the first blank cell in row-major order (row `0..9`, then
    /// column `0..9` within each row), or `None` when the board is complete.
    ///
    /// The scan order fixes the solver's search order and must not change.
    #[must_use]
    pub fn find_next_blank(&self) -> Option<(usize, usize)> {
        (0..SIZE)
            .cartesian_product(0..SIZE)
            .find(|&(row, col)| self.0[row][col] == 0)
    }

    /// Checks the whole board against the Sudoku rules: no filled cell may
    /// share its digit with another cell in the same row, column or 3x3 box.
    /// Blanks are ignored.
    ///
    /// This is the admissibility gate run once before search begins. It is
    /// never called during the search itself — each placement made by the
    /// solver has already passed [`Self::is_placement_valid`], which keeps
    /// internal consistency an invariant rather than something re-derived.
    ///
    /// Implemented with three 81-bit "seen" trackers indexed by
    /// `(unit, digit - 1)` for rows, columns and boxes.
    #[must_use]
    pub fn is_fully_valid(&self) -> bool {
        let mut row_seen = BitVec::from_elem(SIZE * SIZE, false);
        let mut col_seen = BitVec::from_elem(SIZE * SIZE, false);
        let mut box_seen = BitVec::from_elem(SIZE * SIZE, false);

        for row in 0..SIZE {
            for col in 0..SIZE {
                let cell = self.0[row][col];
                if cell == 0 {
                    continue;
                }

                let digit = usize::from(cell - 1);
                let boxidx = (row / BOX) * BOX + col / BOX;

                if row_seen.get(row * SIZE + digit).unwrap_or(false)
                    || col_seen.get(col * SIZE + digit).unwrap_or(false)
                    || box_seen.get(boxidx * SIZE + digit).unwrap_or(false)
                {
                    return false;
                }

                row_seen.set(row * SIZE + digit, true);
                col_seen.set(col * SIZE + digit, true);
                box_seen.set(boxidx * SIZE + digit, true);
            }
        }

        true
    }

    /// Returns `true` when no blank cells remain.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.find_next_blank().is_none()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<[[u8; SIZE]; SIZE]> for Board {
    fn from(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self(cells)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = BoardError;

    /// Validates the structural invariant: exactly nine rows of nine cells,
    /// every cell in `0..=9`.
    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        if rows.len() != SIZE {
            return Err(BoardError::WrongRowCount(rows.len()));
        }

        let mut cells = [[0; SIZE]; SIZE];
        for (row, values) in rows.iter().enumerate() {
            if values.len() != SIZE {
                return Err(BoardError::WrongRowLength {
                    row,
                    len: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value > 9 {
                    return Err(BoardError::DigitOutOfRange { row, col, value });
                }
                cells[row][col] = value;
            }
        }

        Ok(Self(cells))
    }
}

impl Display for Board {
    /// Formats the board as nine lines of space-separated digits, with `-`
    /// standing in for blanks.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|&d| {
                    if d == 0 {
                        "-".to_string()
                    } else {
                        d.to_string()
                    }
                })
                .join(" ");
            write!(f, "{line}")?;
        }
        Ok(())
    }
}
