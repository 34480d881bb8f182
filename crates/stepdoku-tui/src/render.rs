use crate::app::{App, RunState};
use crate::stats::format_duration;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use stepdoku_core::{Board, Position, Trial, Verdict};

/// Draw one frame: grid, info panel, and key help.
///
/// `trial` marks the cell probed this step; accepted candidates are boxed
/// in the success color, rejected ones in the error color with the failing
/// value overlaid.
pub fn render(
    stdout: &mut io::Stdout,
    board: &Board,
    app: &App,
    trial: Option<&Trial>,
) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(
        stdout,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    let cell_width = cell_width(board);
    let grid_width = board.size() as u16 * (cell_width + 1) + 1;
    let grid_height = 2 * board.size() as u16 + 1;

    // Center the grid, leaving room for the info panel on the right
    let total_width = grid_width + 26;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        0
    };
    let start_y = if term_height > grid_height + 3 { 1 } else { 0 };

    render_grid(stdout, board, app, trial, start_x, start_y)?;
    render_info_panel(stdout, board, app, start_x + grid_width + 3, start_y + 1)?;
    render_controls(stdout, app, start_x, start_y + grid_height + 1)?;

    execute!(stdout, ResetColor)?;
    Ok(())
}

fn cell_width(board: &Board) -> u16 {
    board.size().to_string().len() as u16 + 2
}

fn render_grid(
    stdout: &mut io::Stdout,
    board: &Board,
    app: &App,
    trial: Option<&Trial>,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let size = board.size();
    let block = board.block_dim();
    let cell_width = cell_width(board) as usize;

    // Separator rows: '=' fill at block boundaries, '-' fill inside
    let thick: String = format!("+{}", "=".repeat(cell_width)).repeat(size) + "+";
    let thin: String = format!("+{}", "-".repeat(cell_width)).repeat(size) + "+";

    for row in 0..size {
        let sep_y = y + 2 * row as u16;
        if row % block == 0 {
            execute!(
                stdout,
                MoveTo(x, sep_y),
                SetForegroundColor(theme.box_border),
                Print(&thick)
            )?;
        } else {
            execute!(
                stdout,
                MoveTo(x, sep_y),
                SetForegroundColor(theme.border),
                Print(&thin)
            )?;
        }

        let cell_y = sep_y + 1;
        execute!(stdout, MoveTo(x, cell_y))?;
        for col in 0..size {
            let border = if col % block == 0 { "║" } else { "│" };
            let border_color = if col % block == 0 {
                theme.box_border
            } else {
                theme.border
            };
            execute!(stdout, SetForegroundColor(border_color), Print(border))?;
            render_cell(stdout, board, app, trial, Position::new(row, col), cell_width)?;
        }
        execute!(
            stdout,
            SetForegroundColor(theme.box_border),
            Print("║")
        )?;
    }

    // Bottom border
    execute!(
        stdout,
        MoveTo(x, y + 2 * size as u16),
        SetForegroundColor(theme.box_border),
        Print(&thick)
    )?;

    Ok(())
}

fn render_cell(
    stdout: &mut io::Stdout,
    board: &Board,
    app: &App,
    trial: Option<&Trial>,
    pos: Position,
    cell_width: usize,
) -> io::Result<()> {
    let theme = &app.theme;

    if let Some(trial) = trial.filter(|trial| trial.pos == pos) {
        // The probed cell: show the candidate even when it was rejected
        // and never written to the board
        let bg = match trial.verdict {
            Verdict::Accepted => theme.success,
            Verdict::Rejected => theme.error,
        };
        let text = format!("{:^cell_width$}", trial.value);
        execute!(
            stdout,
            SetBackgroundColor(bg),
            SetForegroundColor(theme.bg),
            Print(text),
            SetBackgroundColor(theme.bg)
        )?;
        return Ok(());
    }

    let value = board.get(pos);
    let (text, color) = if value == 0 {
        (format!("{:^cell_width$}", "."), theme.border)
    } else if app.is_given(pos) {
        (format!("{:^cell_width$}", value), theme.given)
    } else {
        (format!("{:^cell_width$}", value), theme.filled)
    };
    execute!(stdout, SetForegroundColor(color), Print(text))?;
    Ok(())
}

fn render_info_panel(
    stdout: &mut io::Stdout,
    board: &Board,
    app: &App,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let state_color = match app.run_state {
        RunState::Solving => theme.info,
        RunState::Solved => theme.success,
        RunState::Unsolvable | RunState::Cancelled => theme.error,
    };

    let title = format!("{} ({}x{})", app.puzzle_name, board.size(), board.size());
    let lines: [(Color, String); 5] = [
        (state_color, format!("status    {}", app.run_state.label())),
        (theme.info, format!("steps     {}", app.stats.steps())),
        (theme.info, format!("placed    {}", app.stats.placements)),
        (theme.info, format!("rejected  {}", app.stats.rejections)),
        (
            theme.info,
            format!("elapsed   {}", format_duration(app.stats.elapsed())),
        ),
    ];

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print(title)
    )?;
    for (i, (color, line)) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + 2 + i as u16),
            SetForegroundColor(*color),
            Print(line)
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let animation = if app.animate { "fast-forward" } else { "animate" };
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("q"),
        SetForegroundColor(theme.info),
        Print(" quit   "),
        SetForegroundColor(theme.key),
        Print("space"),
        SetForegroundColor(theme.info),
        Print(format!(" {animation}"))
    )?;
    Ok(())
}
