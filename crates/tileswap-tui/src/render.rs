use crate::app::{App, CELL_HEIGHT, CELL_WIDTH};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use tileswap_core::{Position, SessionState};

const INFO_WIDTH: u16 = 28;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;
    render_game_screen(stdout, app, term_width, term_height)?;
    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    // Each cell is " X " plus a left border, with one closing border
    let size = app.session.grid().rows() as u16;
    let grid_width = 1 + size * CELL_WIDTH;
    let grid_height = 1 + size * CELL_HEIGHT;

    // Center the grid horizontally, leave room for info panel
    let total_width = grid_width + 3 + INFO_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };

    let start_y = if term_height > grid_height + 10 { 2 } else { 1 };

    // Mouse hit testing reads the origin back
    app.grid_origin = (start_x, start_y);

    render_grid(stdout, app, start_x, start_y)?;

    let info_x = start_x + grid_width + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + grid_height.max(12) + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.session.grid();
    let border = format!("+{}", "---+".repeat(grid.cols()));

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    for row in 0..grid.rows() {
        let line_y = y + row as u16 * CELL_HEIGHT;
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(theme.border),
            Print(&border)
        )?;

        execute!(stdout, MoveTo(x, line_y + 1))?;
        for col in 0..grid.cols() {
            execute!(
                stdout,
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
            render_cell(stdout, app, Position::new(row, col))?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + grid.rows() as u16 * CELL_HEIGHT),
        SetForegroundColor(theme.border),
        Print(&border)
    )?;

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let letter = app.session.grid().get(pos);

    let bg = if app.session.is_cell_highlighted(pos) {
        theme.solved_bg
    } else if app.selected == Some(pos) {
        theme.selected_bg
    } else if pos == app.cursor {
        theme.cursor_bg
    } else {
        theme.bg
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(theme.tile),
        Print(format!(" {} ", letter))
    )?;

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Title
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ TILESWAP ═══")
    )?;

    // Turns
    let turns_color = match session.state() {
        SessionState::Exhausted => theme.error,
        _ if session.turns_left() == 1 => theme.warning,
        _ => theme.info,
    };
    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(turns_color),
        Print(format!("Turns: {:>9}", session.turn_label()))
    )?;

    // State
    let (banner, banner_color) = match session.state() {
        SessionState::Playing => ("Playing", theme.fg),
        SessionState::Solved => ("Solved! Press r for more", theme.success),
        SessionState::Exhausted => ("Out of turns. Try again!", theme.error),
    };
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(banner_color),
        Print(banner)
    )?;

    // Selection
    let selection = match app.selected {
        Some(pos) => format!("Picked: Row {} Col {}", pos.row + 1, pos.col + 1),
        None => format!("Cell: Row {} Col {}", app.cursor.row + 1, app.cursor.col + 1),
    };
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print(selection)
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 7),
        SetForegroundColor(theme.info),
        Print(format!("Theme: {}", app.theme_name()))
    )?;

    // Separator
    execute!(
        stdout,
        MoveTo(x, y + 8),
        SetForegroundColor(theme.border),
        Print("────────────────")
    )?;

    // Clues
    execute!(
        stdout,
        MoveTo(x, y + 9),
        SetForegroundColor(theme.key),
        Print("Clues:")
    )?;
    for (i, line) in wrap_text(&session.clue_text(), INFO_WIDTH as usize)
        .iter()
        .enumerate()
    {
        execute!(
            stdout,
            MoveTo(x, y + 10 + i as u16),
            SetForegroundColor(theme.fg),
            Print(line)
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Space/Enter", "Pick/Swap"),
        ("Mouse", "Click/Drag"),
        ("Esc", "Drop pick"),
        ("u", "Undo"),
        ("r", "Rejumble"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in 2 columns (4 items each)
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 24;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded)
    )?;

    Ok(())
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_width && !current.is_empty() {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Dart thrower, Region, Genuine, Powder", 14);
        assert_eq!(lines, vec!["Dart thrower,", "Region,", "Genuine,", "Powder"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_wrap_keeps_long_words() {
        let lines = wrap_text("Supercalifragilistic word", 8);
        assert_eq!(lines, vec!["Supercalifragilistic", "word"]);
    }
}
