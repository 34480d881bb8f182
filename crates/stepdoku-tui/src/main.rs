mod app;
mod puzzles;
mod render;
mod stats;
mod theme;

use app::{App, AppAction, RunState};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use stats::{format_duration, RunHistory, RunRecord};
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use stepdoku_core::{Board, Outcome, Signal, SolveObserver, Solver, Trial};
use theme::Theme;

/// Watch a backtracking solver work through a Sudoku puzzle
#[derive(Debug, Parser)]
#[command(name = "stepdoku", version, about)]
struct Args {
    /// Built-in puzzle to solve (easy, hard, mega)
    #[arg(short, long, default_value = "easy", conflicts_with = "file")]
    puzzle: String,

    /// Load a puzzle from a file instead: one character per cell, or
    /// whitespace-separated values, with 0 or . marking empty cells
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Animation frame rate cap
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Color theme (dark, light, high-contrast)
    #[arg(long, default_value = "dark")]
    theme: String,

    /// Skip the per-step animation and show only occasional progress
    #[arg(long)]
    no_animation: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (name, mut board) = match load_puzzle(&args) {
        Ok(puzzle) => puzzle,
        Err(message) => {
            eprintln!("stepdoku: {message}");
            std::process::exit(2);
        }
    };

    // The solver itself never validates givens; contradictory input would
    // only send it on a doomed exponential walk, so refuse it here.
    let conflicts = board.conflicts();
    if !conflicts.is_empty() {
        eprintln!("stepdoku: puzzle has conflicting givens at:");
        for pos in conflicts {
            eprintln!("  {pos} = {}", board.get(pos));
        }
        std::process::exit(2);
    }

    let theme = match Theme::named(&args.theme) {
        Some(theme) => theme,
        None => {
            eprintln!("stepdoku: unknown theme {:?}", args.theme);
            std::process::exit(2);
        }
    };

    log::info!("solving {name} ({0}x{0})", board.size());
    let mut app = App::new(name, &board, theme, args.fps, !args.no_animation);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(&mut stdout, &mut app, &mut board);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, Show, LeaveAlternateScreen)?;

    let outcome = result?;
    report(&app, &board, outcome);
    Ok(())
}

/// Resolve the puzzle from the CLI arguments.
fn load_puzzle(args: &Args) -> Result<(String, Board), String> {
    match &args.file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            let board = text
                .parse()
                .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "puzzle".to_string());
            Ok((name, board))
        }
        None => {
            let board = puzzles::builtin(&args.puzzle).ok_or_else(|| {
                format!(
                    "unknown puzzle {:?}; built-ins are: {}",
                    args.puzzle,
                    puzzles::NAMES.join(", ")
                )
            })?;
            Ok((args.puzzle.clone(), board))
        }
    }
}

/// Rendering/input glue handed to the solver as its observer.
///
/// Every step drains pending input so quitting stays responsive even when
/// frames are skipped. With animation on, each step is rendered and the
/// remainder of the frame budget is slept away, pacing the search at the
/// requested frame rate; fast-forward renders a progress frame at most a
/// few times per second and never sleeps.
struct SolveSession<'a> {
    stdout: &'a mut io::Stdout,
    app: &'a mut App,
    last_frame: Option<Instant>,
    io_error: Option<io::Error>,
}

const FAST_FORWARD_FRAME: Duration = Duration::from_millis(250);

impl SolveSession<'_> {
    fn drain_input(&mut self) -> io::Result<AppAction> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if self.app.handle_key(key) == AppAction::Quit {
                    return Ok(AppAction::Quit);
                }
            }
        }
        Ok(AppAction::Continue)
    }

    fn step(&mut self, board: &Board, trial: Option<&Trial>) -> io::Result<Signal> {
        self.app.stats.record(trial);

        if self.drain_input()? == AppAction::Quit {
            return Ok(Signal::Cancel);
        }

        let now = Instant::now();
        if self.app.animate {
            render::render(self.stdout, board, self.app, trial)?;
            self.stdout.flush()?;
            if let Some(last) = self.last_frame {
                let budget = self.app.frame_budget.saturating_sub(now - last);
                if !budget.is_zero() {
                    thread::sleep(budget);
                }
            }
            self.last_frame = Some(Instant::now());
        } else {
            let due = self
                .last_frame
                .is_none_or(|last| now - last >= FAST_FORWARD_FRAME);
            if due {
                render::render(self.stdout, board, self.app, trial)?;
                self.stdout.flush()?;
                self.last_frame = Some(now);
            }
        }

        Ok(Signal::Continue)
    }
}

impl SolveObserver for SolveSession<'_> {
    fn on_step(&mut self, board: &Board, trial: Option<&Trial>) -> Signal {
        match self.step(board, trial) {
            Ok(signal) => signal,
            Err(e) => {
                // Surfaced by run() after the solver unwinds
                self.io_error = Some(e);
                Signal::Cancel
            }
        }
    }
}

fn run(stdout: &mut io::Stdout, app: &mut App, board: &mut Board) -> io::Result<Outcome> {
    let outcome = {
        let mut session = SolveSession {
            stdout: &mut *stdout,
            app: &mut *app,
            last_frame: None,
            io_error: None,
        };
        let outcome = Solver::new().solve(board, &mut session);
        if let Some(e) = session.io_error {
            return Err(e);
        }
        outcome
    };

    app.stats.finish();
    app.run_state = RunState::from(outcome);

    let mut history = RunHistory::load();
    history.record(RunRecord::new(
        &app.puzzle_name,
        board.size(),
        outcome,
        &app.stats,
    ));
    history.save();

    // Keep the final board on screen until the user quits; a cancelled
    // run is already a request to leave
    if outcome != Outcome::Cancelled {
        loop {
            render::render(stdout, board, app, None)?;
            stdout.flush()?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if app.handle_key(key) == AppAction::Quit {
                        break;
                    }
                }
            }
        }
    }

    Ok(outcome)
}

/// Print the run summary after the terminal is restored.
fn report(app: &App, board: &Board, outcome: Outcome) {
    let elapsed = format_duration(app.stats.elapsed());
    match outcome {
        Outcome::Solved => {
            println!(
                "solved {} in {} steps ({} placed, {} rejected) in {elapsed}",
                app.puzzle_name,
                app.stats.steps(),
                app.stats.placements,
                app.stats.rejections
            );
            println!("{board}");
        }
        Outcome::Unsolvable => {
            println!(
                "{} has no solution; exhausted the search after {} steps in {elapsed}",
                app.puzzle_name,
                app.stats.steps()
            );
        }
        Outcome::Cancelled => {
            println!(
                "cancelled {} after {} steps in {elapsed}",
                app.puzzle_name,
                app.stats.steps()
            );
        }
    }
}
