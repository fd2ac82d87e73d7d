//! Tile-swap word puzzle engine.
//!
//! A square grid of letters has to be put back so that every row and every
//! column spells its target word, using a limited number of swaps between
//! neighbouring tiles. This crate holds the game rules and state; it does no
//! I/O and draws nothing.
//!
//! ```
//! use tileswap_core::{GeneratorConfig, Position, Puzzle, Session, SessionState};
//!
//! let mut session = Session::new(Puzzle::sample(), GeneratorConfig::default()).unwrap();
//! assert_eq!(session.state(), SessionState::Playing);
//!
//! let outcome = session.attempt_move(Position::new(0, 0), Position::new(0, 1));
//! assert!(outcome.is_accepted());
//! assert_eq!(session.turn_label(), "1/6");
//! ```

pub mod error;
pub mod generator;
pub mod grid;
pub mod history;
pub mod position;
pub mod puzzle;
pub mod rules;
pub mod session;


pub use error::{GenerateError, GridShapeError, PuzzleError, SessionError};
pub use generator::{Generator, GeneratorConfig, Shuffle, ShuffleStrategy, DEFAULT_MAX_TURNS};
pub use grid::Grid;
pub use history::{Move, MoveHistory};
pub use position::{Direction, Position};
pub use puzzle::{Puzzle, PuzzleDefinition, TargetWords, WordClue};
pub use session::{
    InputSource, MoveIntent, MoveOutcome, Rejection, Session, SessionSnapshot, SessionState,
};
