//! The play-through state machine.
//!
//! [`Session`] owns the board, the move history and the turn counter. Every
//! input path, whatever device produced it, reaches the board through
//! [`Session::attempt_move`], so the legality and turn-budget checks are the
//! same for all of them.

use crate::error::{GenerateError, SessionError};
use crate::generator::{Generator, GeneratorConfig};
use crate::history::{Move, MoveHistory};
use crate::puzzle::{Puzzle, PuzzleDefinition, TargetWords};
use crate::{rules, Grid, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

/// Where a play-through stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Moves are accepted
    Playing,
    /// Every row and column spells its target word
    Solved,
    /// The turn budget is spent and the board is not solved
    Exhausted,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Playing => write!(f, "Playing"),
            SessionState::Solved => write!(f, "Solved"),
            SessionState::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Input device that produced a move intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    Keyboard,
    Click,
    Drag,
    Touch,
}

/// A request to swap two cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub from: Position,
    pub to: Position,
    pub source: InputSource,
}

impl MoveIntent {
    pub fn new(from: Position, to: Position, source: InputSource) -> Self {
        Self { from, to, source }
    }
}

/// Why a move was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The session is solved or out of turns
    NotPlaying(SessionState),
    /// A coordinate lies outside the grid
    OutOfBounds,
    /// The cells are the same, diagonal, or too far apart
    IllegalMove,
}

/// Result of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Accepted { mv: Move, state: SessionState },
    Rejected(Rejection),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// Everything a front end needs to draw the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub rows: Vec<String>,
    pub turn_count: usize,
    pub max_turns: usize,
    pub state: SessionState,
    pub highlighted: bool,
    pub clues: String,
}

/// A single play-through of one puzzle
pub struct Session {
    puzzle: Puzzle,
    generator: Generator,
    grid: Grid,
    history: MoveHistory,
    turn_count: usize,
    state: SessionState,
    /// Whether the out-of-turns notice was already handed out
    exhausted_notified: bool,
}

impl Session {
    /// Start a session with a freshly jumbled board
    pub fn new(puzzle: Puzzle, config: GeneratorConfig) -> Result<Self, SessionError> {
        Self::with_generator(puzzle, Generator::with_config(config))
    }

    /// Validate a definition and start a session on it
    pub fn from_definition(
        definition: PuzzleDefinition,
        config: GeneratorConfig,
    ) -> Result<Self, SessionError> {
        Self::new(Puzzle::new(definition)?, config)
    }

    /// Start a session using a caller-built generator (e.g. a seeded one)
    pub fn with_generator(puzzle: Puzzle, mut generator: Generator) -> Result<Self, SessionError> {
        let shuffle = generator.generate(puzzle.solved())?;
        Ok(Self::with_board(puzzle, generator, shuffle.grid))
    }

    /// Start on an explicit board, skipping the jumble
    pub(crate) fn with_board(puzzle: Puzzle, generator: Generator, grid: Grid) -> Self {
        let mut session = Self {
            puzzle,
            generator,
            grid,
            history: MoveHistory::new(),
            turn_count: 0,
            state: SessionState::Playing,
            exhausted_notified: false,
        };
        session.state = session.evaluate();
        session
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn target(&self) -> &TargetWords {
        self.puzzle.target()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn max_turns(&self) -> usize {
        self.generator.max_turns()
    }

    pub fn turns_left(&self) -> usize {
        self.max_turns().saturating_sub(self.turn_count)
    }

    /// Turn counter formatted as `used/max`
    pub fn turn_label(&self) -> String {
        format!("{}/{}", self.turn_count, self.max_turns())
    }

    pub fn is_solved(&self) -> bool {
        self.state == SessionState::Solved
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == SessionState::Exhausted
    }

    /// Clues joined for display
    pub fn clue_text(&self) -> String {
        self.puzzle.clue_text()
    }

    /// Correctness highlight for the whole board.
    ///
    /// Cells are only marked once the full grid is solved; there is no
    /// per-cell partial credit.
    pub fn highlighted(&self) -> bool {
        self.is_solved()
    }

    /// Correctness highlight for one cell, see [`Session::highlighted`]
    pub fn is_cell_highlighted(&self, pos: Position) -> bool {
        self.grid.contains(pos) && self.highlighted()
    }

    /// Returns `true` the first time it is called after the turn budget ran
    /// out, and `false` afterwards until the next reset.
    pub fn take_exhausted_notice(&mut self) -> bool {
        if self.state == SessionState::Exhausted && !self.exhausted_notified {
            self.exhausted_notified = true;
            true
        } else {
            false
        }
    }

    /// Submit a move intent from any input device
    pub fn submit(&mut self, intent: MoveIntent) -> MoveOutcome {
        debug_span!("move_intent", source = ?intent.source)
            .in_scope(|| self.attempt_move(intent.from, intent.to))
    }

    /// Try to swap two cells.
    ///
    /// A rejected move changes nothing: no history entry, no turn used.
    pub fn attempt_move(&mut self, from: Position, to: Position) -> MoveOutcome {
        let outcome = self.try_move(from, to);
        match outcome {
            MoveOutcome::Accepted { state, .. } => {
                debug!(%from, %to, turn = self.turn_count, "move accepted");
                if state != SessionState::Playing {
                    info!(%state, turns = self.turn_count, "session finished");
                }
            }
            MoveOutcome::Rejected(reason) => {
                debug!(%from, %to, ?reason, "move rejected");
            }
        }
        outcome
    }

    fn try_move(&mut self, from: Position, to: Position) -> MoveOutcome {
        if self.state != SessionState::Playing {
            return MoveOutcome::Rejected(Rejection::NotPlaying(self.state));
        }
        if !self.grid.contains(from) || !self.grid.contains(to) {
            return MoveOutcome::Rejected(Rejection::OutOfBounds);
        }
        if !rules::is_legal(from, to) {
            return MoveOutcome::Rejected(Rejection::IllegalMove);
        }

        let mv = Move::capture(&self.grid, from, to);
        self.grid.swap(from, to);
        self.history.record(mv);
        self.turn_count += 1;
        self.state = self.evaluate();

        MoveOutcome::Accepted {
            mv,
            state: self.state,
        }
    }

    /// Take back the most recent move, if any.
    ///
    /// Undo works from every state, so it can leave `Solved` or `Exhausted`
    /// and return to `Playing`.
    pub fn undo(&mut self) -> Option<Move> {
        if self.turn_count == 0 {
            return None;
        }
        let mv = self.history.undo_last()?;

        mv.restore(&mut self.grid);
        self.turn_count -= 1;
        self.state = self.evaluate();

        debug!(
            from = %mv.from,
            to = %mv.to,
            turn = self.turn_count,
            state = %self.state,
            "move undone"
        );
        Some(mv)
    }

    /// Jumble the board again and clear all progress.
    ///
    /// If a new board cannot be generated the session is left unchanged.
    pub fn reset(&mut self) -> Result<(), GenerateError> {
        let shuffle = self.generator.generate(self.puzzle.solved())?;

        self.grid = shuffle.grid;
        self.history.clear();
        self.turn_count = 0;
        self.exhausted_notified = false;
        self.state = self.evaluate();

        info!("session reset");
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            rows: self.grid.row_strings(),
            turn_count: self.turn_count,
            max_turns: self.max_turns(),
            state: self.state,
            highlighted: self.highlighted(),
            clues: self.clue_text(),
        }
    }

    fn evaluate(&self) -> SessionState {
        if rules::is_solved(&self.grid, self.puzzle.target()) {
            SessionState::Solved
        } else if self.turn_count >= self.max_turns() {
            SessionState::Exhausted
        } else {
            SessionState::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn session(seed: u64) -> Session {
        Session::with_generator(Puzzle::sample(), Generator::with_seed(seed)).unwrap()
    }

    #[test]
    fn test_new_session_is_playing() {
        let session = session(42);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.max_turns(), 6);
        assert_eq!(session.turn_label(), "0/6");
        assert!(session.history().is_empty());
        assert!(!rules::is_solved(session.grid(), session.target()));
        assert!(!session.highlighted());
    }

    #[test]
    fn test_accepted_move_updates_everything() {
        let mut session = session(42);
        let before = session.grid().clone();

        let outcome = session.attempt_move(p(1, 1), p(1, 2));
        assert!(outcome.is_accepted());
        assert_eq!(session.turn_count(), 1);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.grid().get(p(1, 1)), before.get(p(1, 2)));
        assert_eq!(session.grid().get(p(1, 2)), before.get(p(1, 1)));
        assert_eq!(session.turns_left(), 5);
    }

    #[test]
    fn test_rejected_moves_have_no_effect() {
        let mut session = session(42);
        let before = session.grid().clone();

        let cases = [
            (p(0, 0), p(0, 0), Rejection::IllegalMove),
            (p(0, 0), p(1, 1), Rejection::IllegalMove),
            (p(0, 0), p(0, 2), Rejection::IllegalMove),
            (p(3, 3), p(3, 4), Rejection::OutOfBounds),
            (p(4, 0), p(3, 0), Rejection::OutOfBounds),
        ];
        for (from, to, reason) in cases {
            assert_eq!(
                session.attempt_move(from, to),
                MoveOutcome::Rejected(reason)
            );
        }

        assert_eq!(session.grid(), &before);
        assert_eq!(session.turn_count(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn test_undo_on_fresh_session_is_noop() {
        let mut session = session(1);
        let before = session.grid().clone();
        assert_eq!(session.undo(), None);
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.grid(), &before);
    }

    #[test]
    fn test_exhaustion_after_budget() {
        // Row 0 stays wrong, so bouncing a pair in row 3 can never solve
        let mut session = Session::with_board(
            Puzzle::sample(),
            Generator::with_seed(5),
            Grid::from_rows(&["ADRT", "AREA", "REAL", "TALC"]).unwrap(),
        );
        for turn in 1..=6 {
            assert_eq!(session.state(), SessionState::Playing, "before turn {}", turn);
            assert!(session.attempt_move(p(3, 0), p(3, 1)).is_accepted());
        }
        assert_eq!(session.state(), SessionState::Exhausted);
        assert_eq!(session.turn_label(), "6/6");
        assert_eq!(session.turns_left(), 0);
        assert_eq!(
            session.attempt_move(p(3, 0), p(3, 1)),
            MoveOutcome::Rejected(Rejection::NotPlaying(SessionState::Exhausted))
        );
    }

    #[test]
    fn test_exhausted_notice_given_once() {
        // Every reset lands on the same board: ADRT / AREA / REAL / ATLC
        let generator = Generator::with_config(GeneratorConfig::curated(vec![
            (p(0, 0), p(0, 1)),
            (p(3, 0), p(3, 1)),
        ]));
        let mut session = Session::with_board(
            Puzzle::sample(),
            generator,
            Grid::from_rows(&["ADRT", "AREA", "REAL", "TALC"]).unwrap(),
        );
        assert!(!session.take_exhausted_notice());

        session.attempt_move(p(3, 0), p(3, 1));
        session.attempt_move(p(3, 2), p(3, 3));
        assert_eq!(session.state(), SessionState::Exhausted);
        assert!(session.take_exhausted_notice());
        assert!(!session.take_exhausted_notice());

        // Leaving and re-entering exhaustion does not repeat the notice
        session.undo();
        session.attempt_move(p(3, 2), p(3, 3));
        assert_eq!(session.state(), SessionState::Exhausted);
        assert!(!session.take_exhausted_notice());

        session.reset().unwrap();
        assert_eq!(session.grid().row_string(3), "ATLC");
        assert_eq!(session.state(), SessionState::Playing);
        assert!(!session.take_exhausted_notice());

        session.attempt_move(p(2, 2), p(2, 3));
        session.attempt_move(p(2, 2), p(2, 3));
        assert!(session.is_exhausted());
        assert!(session.take_exhausted_notice());
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut session = session(11);
        session.attempt_move(p(0, 0), p(0, 1));
        session.attempt_move(p(2, 2), p(3, 2));

        session.reset().unwrap();
        assert_eq!(session.turn_count(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::Playing);
        assert_ne!(session.grid(), session.puzzle().solved());
        assert_eq!(
            session.grid().letter_counts(),
            session.puzzle().solved().letter_counts()
        );
    }

    #[test]
    fn test_reset_failure_leaves_session_untouched() {
        // This curated sequence cancels itself out, so every reset fails
        let puzzle = Puzzle::new(PuzzleDefinition::Grid {
            grid: vec!["AB".into(), "BA".into()],
            row_clues: vec![],
            column_clues: vec![],
        })
        .unwrap();
        let generator = Generator::with_config(GeneratorConfig::curated(vec![
            (p(0, 0), p(0, 1)),
            (p(0, 1), p(0, 0)),
        ]));
        let board = Grid::from_rows(&["BA", "BA"]).unwrap();
        let mut session = Session::with_board(puzzle, generator, board.clone());
        session.attempt_move(p(0, 0), p(1, 0));
        let grid = session.grid().clone();

        assert_eq!(session.reset(), Err(GenerateError::SequenceSolves));
        assert_eq!(session.grid(), &grid);
        assert_eq!(session.turn_count(), 1);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = session(3);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.rows, session.grid().row_strings());
        assert_eq!(snapshot.max_turns, 6);
        assert_eq!(snapshot.state, SessionState::Playing);
        assert!(!snapshot.highlighted);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_from_definition_rejects_bad_puzzle() {
        let definition = PuzzleDefinition::Grid {
            grid: vec!["AB".into(), "C".into()],
            row_clues: vec![],
            column_clues: vec![],
        };
        assert!(matches!(
            Session::from_definition(definition, GeneratorConfig::default()),
            Err(SessionError::Puzzle(_))
        ));
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Session>();
    }
}
