//! Move legality and win detection.
//!
//! Both checks are pure functions of their arguments.

use crate::{Grid, Position, TargetWords};

/// Check if swapping `a` and `b` is a legal move.
///
/// A swap is legal when the two cells are orthogonal neighbours: they differ
/// by exactly one along exactly one axis. Diagonal pairs and a cell paired
/// with itself are illegal. Bounds are not checked here.
pub fn is_legal(a: Position, b: Position) -> bool {
    a.distance(b) == 1
}

/// Check if every row and column of `grid` spells its target word.
///
/// Rows are compared first so a scrambled board usually fails fast.
pub fn is_solved(grid: &Grid, target: &TargetWords) -> bool {
    if grid.rows() != target.rows.len() || grid.cols() != target.columns.len() {
        return false;
    }

    let rows_match = target
        .rows
        .iter()
        .enumerate()
        .all(|(row, word)| grid.row_string(row) == *word);

    rows_match
        && target
            .columns
            .iter()
            .enumerate()
            .all(|(col, word)| grid.column_string(col) == *word)
}
