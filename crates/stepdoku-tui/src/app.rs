use crate::stats::SolveStats;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use stepdoku_core::{Board, Outcome, Position};

/// Result of handling a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Where the run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Solving,
    Solved,
    Unsolvable,
    Cancelled,
}

impl RunState {
    pub fn label(self) -> &'static str {
        match self {
            RunState::Solving => "solving...",
            RunState::Solved => "solved",
            RunState::Unsolvable => "no solution",
            RunState::Cancelled => "cancelled",
        }
    }
}

impl From<Outcome> for RunState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Solved => RunState::Solved,
            Outcome::Unsolvable => RunState::Unsolvable,
            Outcome::Cancelled => RunState::Cancelled,
        }
    }
}

/// Shared state for the visualizer
pub struct App {
    /// Display name of the puzzle being solved
    pub puzzle_name: String,
    /// Color theme
    pub theme: Theme,
    /// Current run state
    pub run_state: RunState,
    /// Whether each step is rendered; Space toggles this mid-solve
    pub animate: bool,
    /// Minimum time between rendered frames
    pub frame_budget: Duration,
    /// Counters for the current run
    pub stats: SolveStats,
    /// Cells given by the puzzle, row-major; drawn distinctly and never
    /// written by the solver
    givens: Vec<bool>,
    size: usize,
}

impl App {
    pub fn new(puzzle_name: String, board: &Board, theme: Theme, fps: u32, animate: bool) -> Self {
        let givens = board.positions().map(|pos| !board.is_empty(pos)).collect();
        Self {
            puzzle_name,
            theme,
            run_state: RunState::Solving,
            animate,
            frame_budget: Duration::from_secs(1) / fps.max(1),
            stats: SolveStats::new(),
            givens,
            size: board.size(),
        }
    }

    /// Whether the cell at `pos` was part of the original puzzle
    pub fn is_given(&self, pos: Position) -> bool {
        self.givens[pos.row * self.size + pos.col]
    }

    /// Handle a key press; applies to both the solve and idle phases
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char(' ') => {
                self.animate = !self.animate;
                AppAction::Continue
            }
            _ => AppAction::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let board: Board = "1234341221434321".parse().unwrap();
        App::new("test".to_string(), &board, Theme::dark(), 60, true)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), AppAction::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppAction::Quit
        );
        assert_eq!(app.handle_key(key(KeyCode::Char('x'))), AppAction::Continue);
    }

    #[test]
    fn test_space_toggles_animation() {
        let mut app = app();
        assert!(app.animate);
        assert_eq!(app.handle_key(key(KeyCode::Char(' '))), AppAction::Continue);
        assert!(!app.animate);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.animate);
    }

    #[test]
    fn test_givens_mask() {
        let board: Board = "1.2.............".parse().unwrap();
        let app = App::new("test".to_string(), &board, Theme::dark(), 60, true);
        assert!(app.is_given(Position::new(0, 0)));
        assert!(!app.is_given(Position::new(0, 1)));
        assert!(app.is_given(Position::new(0, 2)));
        assert!(!app.is_given(Position::new(3, 3)));
    }

    #[test]
    fn test_run_state_labels() {
        assert_eq!(RunState::from(Outcome::Solved), RunState::Solved);
        assert_eq!(RunState::from(Outcome::Unsolvable), RunState::Unsolvable);
        assert_eq!(RunState::from(Outcome::Cancelled), RunState::Cancelled);
        assert_eq!(RunState::Solving.label(), "solving...");
    }
}
