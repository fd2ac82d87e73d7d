use crate::error::GridShapeError;
use crate::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rectangular matrix of letter tiles, stored row-major.
///
/// The grid does no rule checking: `swap` exchanges any two cells. Legality
/// of a swap is decided by [`crate::rules::is_legal`] before the session
/// calls in here.
///
/// Serialized as a list of row strings, which are checked again on the way
/// back in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Build a grid from equal-length row strings.
    ///
    /// Returns `None` if there are no rows, a row is empty, or the rows
    /// differ in length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let cols = rows.first()?.as_ref().chars().count();
        if cols == 0 {
            return None;
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let before = cells.len();
            cells.extend(row.as_ref().chars());
            if cells.len() - before != cols {
                return None;
            }
        }

        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Check if a position lies inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {} outside {}x{} grid",
            pos,
            self.rows,
            self.cols
        );
        pos.row * self.cols + pos.col
    }

    /// Letter at a position
    pub fn get(&self, pos: Position) -> char {
        self.cells[self.index(pos)]
    }

    /// Overwrite a single cell
    pub fn set(&mut self, pos: Position, letter: char) {
        let idx = self.index(pos);
        self.cells[idx] = letter;
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Position, b: Position) {
        let ia = self.index(a);
        let ib = self.index(b);
        self.cells.swap(ia, ib);
    }

    /// Row `row` read left to right
    pub fn row_string(&self, row: usize) -> String {
        let start = row * self.cols;
        self.cells[start..start + self.cols].iter().collect()
    }

    /// Column `col` read top to bottom
    pub fn column_string(&self, col: usize) -> String {
        (0..self.rows)
            .map(|row| self.get(Position::new(row, col)))
            .collect()
    }

    /// All rows as strings
    pub fn row_strings(&self) -> Vec<String> {
        (0..self.rows).map(|row| self.row_string(row)).collect()
    }

    /// All columns as strings
    pub fn column_strings(&self) -> Vec<String> {
        (0..self.cols).map(|col| self.column_string(col)).collect()
    }

    /// Iterate over every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Multiset of letters on the board
    pub fn letter_counts(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for &letter in &self.cells {
            *counts.entry(letter).or_insert(0) += 1;
        }
        counts
    }

    /// Number of cells whose letter differs from `other`.
    ///
    /// Both grids must have the same dimensions.
    pub fn diff_count(&self, other: &Grid) -> usize {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl TryFrom<Vec<String>> for Grid {
    type Error = GridShapeError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Grid::from_rows(&rows).ok_or(GridShapeError)
    }
}

impl From<Grid> for Vec<String> {
    fn from(grid: Grid) -> Self {
        grid.row_strings()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_string(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(&["DART", "AREA", "REAL", "TALC"]).unwrap()
    }

    #[test]
    fn test_from_rows() {
        let grid = sample();
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.get(Position::new(0, 0)), 'D');
        assert_eq!(grid.get(Position::new(3, 3)), 'C');
    }

    #[test]
    fn test_from_rows_rejects_bad_shapes() {
        assert!(Grid::from_rows::<&str>(&[]).is_none());
        assert!(Grid::from_rows(&[""]).is_none());
        assert!(Grid::from_rows(&["DART", "ARE"]).is_none());
        assert!(Grid::from_rows(&["DAR", "AREA"]).is_none());
    }

    #[test]
    fn test_row_and_column_strings() {
        let grid = sample();
        assert_eq!(grid.row_string(1), "AREA");
        assert_eq!(grid.column_string(3), "TALC");
        assert_eq!(grid.row_strings(), vec!["DART", "AREA", "REAL", "TALC"]);
        assert_eq!(grid.column_strings(), vec!["DART", "AREA", "REAL", "TALC"]);
    }

    #[test]
    fn test_swap_is_involution() {
        let original = sample();
        let mut grid = original.clone();
        let a = Position::new(1, 2);
        let b = Position::new(2, 2);

        grid.swap(a, b);
        assert_eq!(grid.get(a), 'A');
        assert_eq!(grid.get(b), 'E');
        assert_ne!(grid, original);

        grid.swap(a, b);
        assert_eq!(grid, original);
    }

    #[test]
    fn test_swap_conserves_letters() {
        let mut grid = sample();
        let counts = grid.letter_counts();
        grid.swap(Position::new(0, 0), Position::new(0, 1));
        grid.swap(Position::new(3, 2), Position::new(2, 2));
        grid.swap(Position::new(1, 1), Position::new(1, 2));
        assert_eq!(grid.letter_counts(), counts);
    }

    #[test]
    fn test_multibyte_letters() {
        let grid = Grid::from_rows(&["ÄB", "CÖ"]).unwrap();
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.column_string(0), "ÄC");
        assert_eq!(grid.row_string(1), "CÖ");
    }

    #[test]
    fn test_diff_count() {
        let original = sample();
        let mut grid = original.clone();
        assert_eq!(grid.diff_count(&original), 0);
        grid.swap(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(grid.diff_count(&original), 2);
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        let positions: Vec<Position> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        assert_eq!(grid.to_string(), "AB\nCD\n");
    }

    #[test]
    fn test_serde_uses_row_strings() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"["DART","AREA","REAL","TALC"]"#);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_malformed_json_grid_rejected() {
        assert!(serde_json::from_str::<Grid>(r#"["AB", "C"]"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"[]"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"rows":2,"cols":2,"cells":["A"]}"#).is_err());
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_panics() {
        sample().get(Position::new(4, 0));
    }
}
