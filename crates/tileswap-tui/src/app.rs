use crate::theme::{Theme, ThemeName};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;
use tileswap_core::{
    InputSource, MoveIntent, MoveOutcome, Position, Rejection, Session, SessionState,
};
use tracing::{info, warn};

/// Columns taken by one cell, including its left border
pub const CELL_WIDTH: u16 = 4;
/// Rows taken by one cell, including its top border
pub const CELL_HEIGHT: u16 = 2;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state
pub struct App {
    /// Current play-through
    pub session: Session,
    /// Keyboard cursor
    pub cursor: Position,
    /// First cell of a click-then-click (or select-then-select) swap
    pub selected: Option<Position>,
    /// Cell under the mouse when the left button went down
    drag_start: Option<Position>,
    /// Color theme
    pub theme: Theme,
    theme_name: ThemeName,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Screen position of the grid's top-left corner, set while rendering
    pub grid_origin: (u16, u16),
}

impl App {
    pub fn new(session: Session, theme_name: ThemeName) -> Self {
        Self {
            session,
            cursor: Position::new(0, 0),
            selected: None,
            drag_start: None,
            theme: Theme::named(theme_name),
            theme_name,
            message: None,
            message_timer: 0,
            grid_origin: (0, 0),
        }
    }

    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    pub fn theme_name(&self) -> ThemeName {
        self.theme_name
    }

    fn size(&self) -> usize {
        self.session.grid().rows()
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Pick the cursor cell, or swap it with the picked one
            KeyCode::Enter | KeyCode::Char(' ') => self.pick(self.cursor, InputSource::Keyboard),

            KeyCode::Esc => self.selected = None,

            KeyCode::Char('u') => {
                if self.session.undo().is_some() {
                    self.selected = None;
                    self.show_message("Undo");
                }
            }

            KeyCode::Char('r') => self.reset(),

            KeyCode::Char('t') => {
                self.theme_name = self.theme_name.next();
                self.theme = Theme::named(self.theme_name);
                self.show_message(&format!("{} theme", self.theme_name));
            }

            _ => {}
        }

        AppAction::Continue
    }

    /// Handle a mouse event.
    ///
    /// A press and release on the same cell acts as a click; releasing on a
    /// different cell is a drag-and-drop swap.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let cell = self.cell_at(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = cell;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(start) = self.drag_start.take() else {
                    return;
                };
                match cell {
                    Some(end) if end == start => {
                        self.cursor = end;
                        self.pick(end, InputSource::Click);
                    }
                    Some(end) => {
                        self.selected = None;
                        self.cursor = end;
                        self.submit(MoveIntent::new(start, end, InputSource::Drag));
                    }
                    None => {}
                }
            }
            _ => {}
        }
    }

    /// Grid cell under a terminal coordinate
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        let (x, y) = self.grid_origin;
        let dx = column.checked_sub(x + 1)?;
        let dy = row.checked_sub(y + 1)?;
        if dx % CELL_WIDTH == CELL_WIDTH - 1 || dy % CELL_HEIGHT == CELL_HEIGHT - 1 {
            return None;
        }

        let pos = Position::new((dy / CELL_HEIGHT) as usize, (dx / CELL_WIDTH) as usize);
        self.session.grid().contains(pos).then_some(pos)
    }

    /// Select a cell, or submit a swap with the already selected one.
    ///
    /// The selection is cleared after a swap attempt whether or not the
    /// swap was accepted.
    fn pick(&mut self, pos: Position, source: InputSource) {
        match self.selected.take() {
            Some(first) => {
                self.submit(MoveIntent::new(first, pos, source));
            }
            None => {
                if self.session.state() == SessionState::Playing {
                    self.selected = Some(pos);
                } else {
                    self.explain_rejection(Rejection::NotPlaying(self.session.state()));
                }
            }
        }
    }

    fn submit(&mut self, intent: MoveIntent) {
        match self.session.submit(intent) {
            MoveOutcome::Accepted { state, .. } => {
                if state == SessionState::Solved {
                    info!(turns = self.session.turn_count(), "puzzle solved");
                    self.show_message("Solved!");
                }
            }
            MoveOutcome::Rejected(reason) => self.explain_rejection(reason),
        }

        if self.session.take_exhausted_notice() {
            self.show_message(&format!(
                "You have used all {} turns. Try again!",
                self.session.max_turns()
            ));
        }
    }

    fn explain_rejection(&mut self, reason: Rejection) {
        match reason {
            Rejection::NotPlaying(SessionState::Solved) => {
                self.show_message("Already solved. Press r for a new jumble")
            }
            Rejection::NotPlaying(_) => self.show_message("Out of turns. Press r to try again"),
            Rejection::IllegalMove | Rejection::OutOfBounds => {
                self.show_message("Only neighbouring tiles can swap")
            }
        }
    }

    fn reset(&mut self) {
        match self.session.reset() {
            Ok(()) => {
                self.selected = None;
                self.drag_start = None;
                self.show_message("New jumble");
            }
            Err(e) => {
                warn!(error = %e, "reset failed");
                self.show_message("Could not jumble the puzzle");
            }
        }
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let max = self.size() as i32 - 1;
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(new_row, new_col);
    }
}
