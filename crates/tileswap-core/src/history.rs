use crate::{Grid, Position};
use serde::{Deserialize, Serialize};

/// One accepted swap, recorded with the letters both cells held before it.
///
/// Because the record keeps pre-swap contents rather than the swap
/// direction, restoring it is the same two writes no matter which cell the
/// player picked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub from_letter: char,
    pub to_letter: char,
}

impl Move {
    /// Capture the current contents of `from` and `to`
    pub fn capture(grid: &Grid, from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            from_letter: grid.get(from),
            to_letter: grid.get(to),
        }
    }

    /// Write the pre-swap letters back into the grid
    pub fn restore(&self, grid: &mut Grid) {
        grid.set(self.from, self.from_letter);
        grid.set(self.to, self.to_letter);
    }
}

/// LIFO stack of accepted moves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Pop the most recent move. An empty history returns `None` and is
    /// left untouched.
    pub fn undo_last(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Moves from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}
