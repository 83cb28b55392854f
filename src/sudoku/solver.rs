#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking search engine.
//!
//! [`solve`] performs a depth-first search over the blank cells of a
//! [`Board`], visiting cells in row-major order and candidate digits in
//! ascending order. Every tentative placement is vetted by
//! [`Board::is_placement_valid`] before recursing, so the partial assignment
//! is consistent at all times; a branch that runs out of candidates undoes its
//! placement and reports [`SearchOutcome::Unsolvable`] to the level above,
//! which is the backtrack step.
//!
//! The search is bounded by a [`Budget`]: a wall-clock deadline plus a shared
//! cancellation flag, polled at the top of every recursive entry. Cancellation
//! is checked, never preemptive — the worst-case latency between the budget
//! expiring and the search returning is one recursion step of O(1) work, not
//! the remaining search space. The original implementation aborted the
//! recursion with an asynchronous alarm signal; cooperative polling gives the
//! same bound without relying on process-wide signal delivery.
//!
//! For a fixed admissible input the search is deterministic: absent a timeout,
//! repeated runs visit the same cells and digits in the same order and return
//! the same solution. Recursion depth is bounded by the 81 cells of the board,
//! so no separate depth guard exists.

use crate::sudoku::board::Board;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// The terminal outcome of a search. Carries no payload — on
/// [`SearchOutcome::Solved`] the completed grid is read back from the board
/// that was passed to [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete, rule-satisfying assignment was reached. The board holds it.
    Solved,
    /// The search space was exhausted without finding a completion. Distinct
    /// from malformed or inadmissible input, which is rejected before any
    /// search begins.
    Unsolvable,
    /// The budget ran out before the search finished. Not a proof of
    /// impossibility, and the board's contents are not meaningful.
    TimedOut,
}

impl SearchOutcome {
    /// Returns `true` for [`SearchOutcome::Solved`].
    #[must_use]
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

/// The resource bound on a search: an optional wall-clock deadline and a
/// cancellation flag shared between clones.
///
/// Cloning a `Budget` shares the flag, so a clone handed to another thread can
/// abort an in-flight search:
///
/// ```
/// use sudoku_solver::sudoku::solver::Budget;
///
/// let budget = Budget::unlimited();
/// let handle = budget.clone();
/// handle.cancel();
/// assert!(budget.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct Budget {
    /// Point in time after which the search must abort, if any.
    deadline: Option<Instant>,
    /// External abort flag, shared between clones of this budget.
    cancelled: Arc<AtomicBool>,
}

impl Budget {
    /// Creates a budget with no deadline. The search can still be aborted via
    /// [`Self::cancel`].
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a budget whose deadline is `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals every search holding a clone of this budget to abort at its
    /// next poll.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once the deadline has passed or [`Self::cancel`] has
    /// been called.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Solves the board in place by backtracking search, subject to `budget`.
///
/// The caller must have gated the board through [`Board::is_fully_valid`]
/// first: the search assumes it starts from an admissible position and only
/// ever makes admissible placements itself. Solving an inadmissible board is
/// not detected and yields a grid that still violates the rules.
///
/// The board is exclusively owned by this call for its duration. On
/// [`SearchOutcome::Solved`] it holds the completed grid; on any other outcome
/// its contents are scratch state the caller should discard.
///
/// # Algorithm
///
/// 1. If the budget is exhausted, return [`SearchOutcome::TimedOut`] without
///    recursing further.
/// 2. Find the next blank cell in row-major order. No blank means the board is
///    complete and consistent by construction: return
///    [`SearchOutcome::Solved`].
/// 3. For each candidate digit `1..=9` in ascending order that passes the
///    placement check: place it and recurse. `Solved` propagates upward with
///    the placement kept; `TimedOut` propagates upward immediately;
///    `Unsolvable` undoes the placement and tries the next digit.
/// 4. With all candidates exhausted, report [`SearchOutcome::Unsolvable`] to
///    the caller, triggering backtracking one level up.
#[must_use]
pub fn solve(board: &mut Board, budget: &Budget) -> SearchOutcome {
    if budget.is_exhausted() {
        return SearchOutcome::TimedOut;
    }

    let Some((row, col)) = board.find_next_blank() else {
        return SearchOutcome::Solved;
    };

    for digit in 1..=9 {
        if !board.is_placement_valid(row, col, digit) {
            continue;
        }

        board.set(row, col, digit);
        match solve(board, budget) {
            SearchOutcome::Unsolvable => board.set(row, col, 0),
            outcome => return outcome,
        }
    }

    SearchOutcome::Unsolvable
}

/// Convenience wrapper: solves the board under a fresh deadline of
/// `timeout_secs` seconds. A zero timeout is a caller error and aborts the
/// search before it places anything.
#[must_use]
pub fn solve_with_timeout(board: &mut Board, timeout_secs: u64) -> SearchOutcome {
    let budget = Budget::with_timeout(Duration::from_secs(timeout_secs));
    solve(board, &budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::EXAMPLE;

    /// The unique solution of [`EXAMPLE`].
    const EXAMPLE_SOLVED: [[u8; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    #[test]
    fn test_solves_example() {
        let mut board = Board::from(EXAMPLE);
        assert!(board.is_fully_valid());

        let outcome = solve(&mut board, &Budget::unlimited());

        assert_eq!(outcome, SearchOutcome::Solved);
        assert_eq!(board, Board::from(EXAMPLE_SOLVED));
        assert!(board.is_fully_valid());
        assert!(board.is_complete());
    }

    #[test]
    fn test_solve_is_deterministic() {
        let mut first = Board::from(EXAMPLE);
        let mut second = Board::from(EXAMPLE);

        assert!(solve(&mut first, &Budget::unlimited()).is_solved());
        assert!(solve(&mut second, &Budget::unlimited()).is_solved());
        assert_eq!(first, second);
    }

    #[test]
    fn test_already_solved_board_is_untouched() {
        let mut board = Board::from(EXAMPLE_SOLVED);
        let before = board.clone();

        let outcome = solve(&mut board, &Budget::unlimited());

        assert_eq!(outcome, SearchOutcome::Solved);
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_blank_places_last_digit() {
        let mut board = Board::from(EXAMPLE_SOLVED);
        // (8, 8) holds 9 in the solution; its row, column and box carry 1..=8.
        board.set(8, 8, 0);

        let outcome = solve(&mut board, &Budget::unlimited());

        assert_eq!(outcome, SearchOutcome::Solved);
        assert_eq!(board.get(8, 8), 9);
    }

    #[test]
    fn test_empty_board_solves_row_major_ascending() {
        let mut board = Board::empty();

        let outcome = solve(&mut board, &Budget::unlimited());

        assert_eq!(outcome, SearchOutcome::Solved);
        assert!(board.is_complete());
        assert!(board.is_fully_valid());

        // Determinism commitment: the final contents of the first band are
        // fixed by the row-major, ascending-digit search order.
        assert_eq!(board.cells()[0], [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(board.cells()[1], [4, 5, 6, 7, 8, 9, 1, 2, 3]);
        assert_eq!(board.cells()[2], [7, 8, 9, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_unsolvable_board_is_reported() {
        // Row 0 carries 2..=9 and its missing digit 1 is blocked by the 1 at
        // (2, 2), which shares the top-left box with the blank (0, 0). The
        // board passes the admissibility gate yet has no completion.
        let mut board = Board::empty();
        for (col, digit) in (1..9).enumerate() {
            board.set(0, col + 1, digit + 1);
        }
        board.set(2, 2, 1);
        assert!(board.is_fully_valid());

        let outcome = solve(&mut board, &Budget::unlimited());

        assert_eq!(outcome, SearchOutcome::Unsolvable);
        // The failure path undid every tentative placement.
        assert_eq!(board.get(0, 0), 0);
    }

    /// A grid engineered against ascending row-major brute force: the top
    /// rows are nearly empty while the givens sit low in the grid, so the
    /// search commits to small digits early and only discovers the
    /// contradictions after descending through an enormous subtree.
    const ADVERSARIAL: [[u8; 9]; 9] = [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 3, 0, 8, 5],
        [0, 0, 1, 0, 2, 0, 0, 0, 0],
        [0, 0, 0, 5, 0, 7, 0, 0, 0],
        [0, 0, 4, 0, 0, 0, 1, 0, 0],
        [0, 9, 0, 0, 0, 0, 0, 0, 0],
        [5, 0, 0, 0, 0, 0, 0, 7, 3],
        [0, 0, 2, 0, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 4, 0, 0, 0, 9],
    ];

    #[test]
    fn test_deadline_expiring_mid_search_times_out_promptly() {
        let mut board = Board::from(ADVERSARIAL);
        assert!(board.is_fully_valid());

        let start = Instant::now();
        let outcome = solve_with_timeout(&mut board, 1);
        let elapsed = start.elapsed();

        assert_eq!(outcome, SearchOutcome::TimedOut);
        // Checked cancellation: the overhead past the one-second deadline is
        // bounded by a single recursion step, so the search must return well
        // before the half-second slack expires.
        assert!(
            elapsed < Duration::from_millis(1500),
            "search returned after {elapsed:?}"
        );
    }

    #[test]
    fn test_expired_deadline_times_out_before_any_placement() {
        let mut board = Board::from(EXAMPLE);
        let before = board.clone();
        let budget = Budget::with_timeout(Duration::ZERO);

        let outcome = solve(&mut board, &budget);

        assert_eq!(outcome, SearchOutcome::TimedOut);
        assert_eq!(board, before);
    }

    #[test]
    fn test_cancelled_budget_times_out() {
        let mut board = Board::from(EXAMPLE);
        let budget = Budget::unlimited();
        budget.cancel();

        assert_eq!(solve(&mut board, &budget), SearchOutcome::TimedOut);
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let budget = Budget::unlimited();
        let handle = budget.clone();

        assert!(!budget.is_exhausted());
        handle.cancel();
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_generous_timeout_still_solves() {
        let mut board = Board::from(EXAMPLE);

        let outcome = solve_with_timeout(&mut board, 10);

        assert_eq!(outcome, SearchOutcome::Solved);
        assert_eq!(board, Board::from(EXAMPLE_SOLVED));
    }
}
