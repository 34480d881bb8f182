use crate::{checker, Board, Position};
use serde::{Deserialize, Serialize};

/// Whether a probed candidate passed the uniqueness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The candidate was placed on the board
    Accepted,
    /// The candidate conflicts and was not placed
    Rejected,
}

/// One candidate probed at a cell during the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// The cell being filled
    pub pos: Position,
    /// The candidate value (present on the board only when accepted)
    pub value: u8,
    /// Whether the candidate passed the checks
    pub verdict: Verdict,
}

/// An observer's reply to a step notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep searching
    Continue,
    /// Stop the search as soon as possible
    Cancel,
}

/// Final result of a solve run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every cell is filled and the uniqueness invariant holds
    Solved,
    /// The search exhausted every candidate without completing the board
    Unsolvable,
    /// An observer requested cancellation mid-search
    Cancelled,
}

/// Callback seam between the solver and a frontend.
///
/// The solver calls `on_step` once before the search begins (with no
/// trial) and again after every candidate probe. Observers may read the
/// board during the call but must not retain its state, and should return
/// promptly; this is also the only point where cancellation is polled.
pub trait SolveObserver {
    fn on_step(&mut self, board: &Board, trial: Option<&Trial>) -> Signal;
}

impl<F> SolveObserver for F
where
    F: FnMut(&Board, Option<&Trial>) -> Signal,
{
    fn on_step(&mut self, board: &Board, trial: Option<&Trial>) -> Signal {
        self(board, trial)
    }
}

/// Result of one recursive descent
enum Search {
    Solved,
    Exhausted,
    Cancelled,
}

/// Exhaustive depth-first backtracking solver.
///
/// Scans for the first empty cell in row-major order, tries candidates in
/// ascending order, and recurses on every accepted placement, undoing it
/// if the branch below dead-ends. The first complete assignment wins, so
/// repeated runs on the same board produce the same solution. Worst-case
/// time is exponential in the number of empty cells; the solver makes no
/// attempt to be clever, only to be watchable.
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Solve `board` in place, reporting every probe to `observer`.
    ///
    /// On `Solved` the board holds the completed grid. On `Unsolvable`
    /// every trial placement has been reverted, leaving the board as it
    /// was passed in. After `Cancelled` the board contents are
    /// unspecified.
    pub fn solve<O>(&self, board: &mut Board, observer: &mut O) -> Outcome
    where
        O: SolveObserver + ?Sized,
    {
        if let Signal::Cancel = observer.on_step(board, None) {
            return Outcome::Cancelled;
        }
        match self.search(board, observer) {
            Search::Solved => Outcome::Solved,
            Search::Exhausted => Outcome::Unsolvable,
            Search::Cancelled => Outcome::Cancelled,
        }
    }

    /// Solve `board` in place without visualization.
    pub fn solve_silent(&self, board: &mut Board) -> Outcome {
        self.solve(board, &mut |_: &Board, _: Option<&Trial>| Signal::Continue)
    }

    fn search<O>(&self, board: &mut Board, observer: &mut O) -> Search
    where
        O: SolveObserver + ?Sized,
    {
        let pos = match board.first_empty() {
            Some(pos) => pos,
            None => return Search::Solved,
        };

        for value in 1..=board.size() as u8 {
            if checker::is_valid(board, value, pos) {
                board.set(pos, value);
                let trial = Trial {
                    pos,
                    value,
                    verdict: Verdict::Accepted,
                };
                if let Signal::Cancel = observer.on_step(board, Some(&trial)) {
                    return Search::Cancelled;
                }
                match self.search(board, observer) {
                    // Undo the placement before trying the next candidate
                    Search::Exhausted => board.set(pos, 0),
                    done => return done,
                }
            } else {
                let trial = Trial {
                    pos,
                    value,
                    verdict: Verdict::Rejected,
                };
                if let Signal::Cancel = observer.on_step(board, Some(&trial)) {
                    return Search::Cancelled;
                }
            }
        }

        Search::Exhausted
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const EASY_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    /// Every row, column, and block holds each value exactly once.
    fn assert_valid_solution(board: &Board) {
        assert!(board.is_complete());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_solves_to_known_solution() {
        let mut board: Board = EASY.parse().unwrap();
        let outcome = Solver::new().solve_silent(&mut board);
        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(board.to_compact_string(), EASY_SOLUTION);
        assert_valid_solution(&board);
    }

    #[test]
    fn test_determinism() {
        let mut first: Board = EASY.parse().unwrap();
        let mut second: Board = EASY.parse().unwrap();
        Solver::new().solve_silent(&mut first);
        Solver::new().solve_silent(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_givens_are_preserved() {
        let original: Board = EASY.parse().unwrap();
        let mut board = original.clone();
        assert_eq!(Solver::new().solve_silent(&mut board), Outcome::Solved);
        for pos in original.positions() {
            if !original.is_empty(pos) {
                assert_eq!(board.get(pos), original.get(pos));
            }
        }
    }

    #[test]
    fn test_single_missing_cell() {
        // Row, column, and block all force the missing value to 4
        let mut board = Board::from_rows(&[
            vec![1, 2, 3, 0],
            vec![3, 4, 1, 2],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 1],
        ])
        .unwrap();
        assert_eq!(Solver::new().solve_silent(&mut board), Outcome::Solved);
        assert_eq!(board.get(Position::new(0, 3)), 4);
        assert_valid_solution(&board);
    }

    #[test]
    fn test_already_complete_board_makes_no_trials() {
        let mut board: Board = EASY_SOLUTION.parse().unwrap();
        let before = board.clone();
        let mut notifications = 0u32;
        let mut trials = 0u32;
        let outcome = Solver::new().solve(&mut board, &mut |_: &Board, trial: Option<&Trial>| {
            notifications += 1;
            if trial.is_some() {
                trials += 1;
            }
            Signal::Continue
        });
        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(board, before);
        assert_eq!(notifications, 1);
        assert_eq!(trials, 0);
    }

    #[test]
    fn test_empty_board_completes() {
        let mut board = Board::empty(9).unwrap();
        assert_eq!(Solver::new().solve_silent(&mut board), Outcome::Solved);
        assert_valid_solution(&board);
    }

    #[test]
    fn test_empty_4x4_board_completes() {
        let mut board = Board::empty(4).unwrap();
        assert_eq!(Solver::new().solve_silent(&mut board), Outcome::Solved);
        assert_valid_solution(&board);
    }

    #[test]
    fn test_unsolvable_with_consistent_givens() {
        // Givens are conflict-free, yet (0, 3) has no candidate: the row
        // rules out 1..3 and the column rules out 4
        let original = Board::from_rows(&[
            vec![1, 2, 3, 0],
            vec![0, 0, 0, 4],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        assert!(original.is_consistent());
        let mut board = original.clone();
        assert_eq!(Solver::new().solve_silent(&mut board), Outcome::Unsolvable);
        assert_eq!(board, original);
    }

    #[test]
    fn test_duplicate_givens_terminate_and_restore() {
        // Contradictory givens are not validated up front; the search must
        // still exhaust in finite time and revert every trial placement
        let original = Board::from_rows(&[
            vec![1, 1, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let mut board = original.clone();
        assert_eq!(Solver::new().solve_silent(&mut board), Outcome::Unsolvable);
        assert_eq!(board, original);
    }

    #[test]
    fn test_rejections_are_observed_without_mutation() {
        // First empty cell is (0, 2); candidates 1 and 2 conflict with the
        // row and must be reported as rejected with the cell left empty
        let mut board = Board::from_rows(&[
            vec![1, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let mut rejected = Vec::new();
        let outcome = Solver::new().solve(&mut board, &mut |board: &Board,
                                                            trial: Option<&Trial>| {
            if let Some(trial) = trial {
                if trial.verdict == Verdict::Rejected {
                    rejected.push((trial.pos, trial.value));
                    assert!(board.is_empty(trial.pos));
                }
            }
            Signal::Continue
        });
        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(rejected[0], (Position::new(0, 2), 1));
        assert_eq!(rejected[1], (Position::new(0, 2), 2));
        assert_valid_solution(&board);
    }

    #[test]
    fn test_cancellation() {
        let mut board: Board = EASY.parse().unwrap();
        let mut steps = 0u32;
        let outcome = Solver::new().solve(&mut board, &mut |_: &Board, _: Option<&Trial>| {
            steps += 1;
            if steps > 10 {
                Signal::Cancel
            } else {
                Signal::Continue
            }
        });
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(steps, 11);
        assert!(!board.is_complete());
    }

    #[test]
    fn test_cancellation_before_search() {
        let mut board: Board = EASY.parse().unwrap();
        let before = board.clone();
        let outcome =
            Solver::new().solve(&mut board, &mut |_: &Board, _: Option<&Trial>| Signal::Cancel);
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(board, before);
    }

    #[test]
    fn test_trivial_1x1_board() {
        let mut board = Board::empty(1).unwrap();
        assert_eq!(Solver::new().solve_silent(&mut board), Outcome::Solved);
        assert_eq!(board.get(Position::new(0, 0)), 1);
    }
}
