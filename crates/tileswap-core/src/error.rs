use thiserror::Error;

/// Rows that do not form a rectangle of letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("grid rows must be non-empty and all the same length")]
pub struct GridShapeError;

/// A puzzle definition that cannot be played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("puzzle has no words")]
    NoWords,
    #[error("row {row} is empty")]
    EmptyWord { row: usize },
    #[error("row {row} has {found} letters, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid is {rows}x{cols}, only square grids are supported")]
    NotSquare { rows: usize, cols: usize },
    #[error("{kind} clue count is {found}, expected {expected}")]
    ClueCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("column {col} target {found:?} does not match the solved grid ({expected:?})")]
    ColumnMismatch {
        col: usize,
        expected: String,
        found: String,
    },
    #[error("no swap of two adjacent tiles changes the grid")]
    Unscramblable,
}

/// Failure to produce a jumbled starting grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("turn budget must be at least one")]
    ZeroTurns,
    #[error("grid has no pair of adjacent cells")]
    NoLegalSwap,
    #[error("curated sequence has {found} swaps, expected {expected}")]
    SequenceLength { expected: usize, found: usize },
    #[error("curated swap {index} between {from} and {to} is not a legal move")]
    IllegalSwap {
        index: usize,
        from: crate::Position,
        to: crate::Position,
    },
    #[error("curated sequence leaves the grid solved")]
    SequenceSolves,
    #[error("every one of {attempts} random walks landed back on the solved grid")]
    AttemptsExhausted { attempts: usize },
}

/// Failure to start a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid puzzle: {0}")]
    Puzzle(#[from] PuzzleError),
    #[error("could not jumble puzzle: {0}")]
    Generate(#[from] GenerateError),
}
