//! Core engine for watching a backtracking solver work through
//! Sudoku-family puzzles.
//!
//! The board side length may be any perfect square (4x4, 9x9, 16x16, ...);
//! the block dimension is its integer square root. [`Solver`] fills a
//! [`Board`] in place by depth-first search, reporting every candidate it
//! probes to a [`SolveObserver`] so a frontend can animate the search and
//! request cancellation.

mod board;
pub mod checker;
mod solver;

pub use board::{Board, BoardError, Position};
pub use solver::{Outcome, Signal, SolveObserver, Solver, Trial, Verdict};
