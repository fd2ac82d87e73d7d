//! Puzzle definitions and their validation.
//!
//! A definition comes in one of two authoring forms: a list of row words
//! with one clue each (column words are derived by transposition), or a
//! solved grid with separate row and column clue lists. Either form is
//! checked once here; a [`Puzzle`] that exists is always playable.

use crate::error::PuzzleError;
use crate::{rules, Grid, Position};
use serde::{Deserialize, Serialize};

/// A row word and the clue shown for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordClue {
    pub word: String,
    #[serde(default)]
    pub clue: String,
}

/// Puzzle as authored, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PuzzleDefinition {
    /// Row words with per-row clues.
    ///
    /// `columns` may list the column words explicitly; they must then agree
    /// with the transposed rows.
    Words {
        words: Vec<WordClue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    /// A solved grid with separate clue lists
    Grid {
        grid: Vec<String>,
        #[serde(default)]
        row_clues: Vec<String>,
        #[serde(default)]
        column_clues: Vec<String>,
    },
}

/// The row and column words of the solved grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWords {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
}

impl TargetWords {
    /// Read the targets off a solved grid
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            rows: grid.row_strings(),
            columns: grid.column_strings(),
        }
    }
}

/// A validated puzzle: solved grid, its targets, and clues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    solved: Grid,
    target: TargetWords,
    clues: Vec<String>,
}

impl Puzzle {
    /// Validate a definition.
    ///
    /// Rejects an empty word list, empty or ragged rows, non-square grids,
    /// clue lists of the wrong length, explicit column words that disagree
    /// with the rows, and grids where no adjacent swap changes anything.
    pub fn new(definition: PuzzleDefinition) -> Result<Self, PuzzleError> {
        match definition {
            PuzzleDefinition::Words { words, columns } => {
                let rows: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
                let solved = build_grid(&rows)?;
                let target = TargetWords::from_grid(&solved);

                if let Some(columns) = columns {
                    check_columns(&target, &columns)?;
                }

                let clues = words
                    .into_iter()
                    .map(|w| w.clue)
                    .filter(|clue| !clue.is_empty())
                    .collect();
                Self::finish(solved, target, clues)
            }
            PuzzleDefinition::Grid {
                grid,
                row_clues,
                column_clues,
            } => {
                let solved = build_grid(&grid)?;
                check_clue_count("row", solved.rows(), &row_clues)?;
                check_clue_count("column", solved.cols(), &column_clues)?;

                let target = TargetWords::from_grid(&solved);
                let clues = row_clues.into_iter().chain(column_clues).collect();
                Self::finish(solved, target, clues)
            }
        }
    }

    /// Build a puzzle from explicit row and column targets.
    ///
    /// The solved grid is taken from `rows`; every column word must equal the
    /// corresponding transposed column.
    pub fn from_targets(target: TargetWords, clues: Vec<String>) -> Result<Self, PuzzleError> {
        let solved = build_grid(&target.rows)?;
        let derived = TargetWords::from_grid(&solved);
        check_columns(&derived, &target.columns)?;
        Self::finish(solved, target, clues)
    }

    fn finish(solved: Grid, target: TargetWords, clues: Vec<String>) -> Result<Self, PuzzleError> {
        if !solved.is_square() {
            return Err(PuzzleError::NotSquare {
                rows: solved.rows(),
                cols: solved.cols(),
            });
        }
        if !has_effective_swap(&solved) {
            return Err(PuzzleError::Unscramblable);
        }
        debug_assert!(rules::is_solved(&solved, &target));

        Ok(Self {
            solved,
            target,
            clues,
        })
    }

    /// The four-by-four sample board
    pub fn sample() -> Self {
        let words = [
            ("DART", "Feathered missile thrown at a board"),
            ("AREA", "Length times width"),
            ("REAL", "Not imaginary"),
            ("TALC", "Softest mineral"),
        ];
        let definition = PuzzleDefinition::Words {
            words: words
                .iter()
                .map(|(word, clue)| WordClue {
                    word: (*word).to_string(),
                    clue: (*clue).to_string(),
                })
                .collect(),
            columns: None,
        };
        match Self::new(definition) {
            Ok(puzzle) => puzzle,
            Err(e) => unreachable!("sample puzzle is valid: {e}"),
        }
    }

    pub fn solved(&self) -> &Grid {
        &self.solved
    }

    pub fn target(&self) -> &TargetWords {
        &self.target
    }

    pub fn clues(&self) -> &[String] {
        &self.clues
    }

    /// Clues joined for display
    pub fn clue_text(&self) -> String {
        self.clues.join(", ")
    }

    /// Side length of the square grid
    pub fn size(&self) -> usize {
        self.solved.rows()
    }
}

fn build_grid<S: AsRef<str>>(rows: &[S]) -> Result<Grid, PuzzleError> {
    let first = rows.first().ok_or(PuzzleError::NoWords)?;
    let expected = first.as_ref().chars().count();

    for (row, word) in rows.iter().enumerate() {
        let found = word.as_ref().chars().count();
        if found == 0 {
            return Err(PuzzleError::EmptyWord { row });
        }
        if found != expected {
            return Err(PuzzleError::RowLength {
                row,
                expected,
                found,
            });
        }
    }

    // Shapes were checked above
    Grid::from_rows(rows).ok_or(PuzzleError::NoWords)
}

fn check_columns(derived: &TargetWords, columns: &[String]) -> Result<(), PuzzleError> {
    for col in 0..derived.columns.len().max(columns.len()) {
        let expected = derived.columns.get(col).cloned().unwrap_or_default();
        let found = columns.get(col).cloned().unwrap_or_default();
        if expected != found {
            return Err(PuzzleError::ColumnMismatch {
                col,
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn check_clue_count(
    kind: &'static str,
    expected: usize,
    clues: &[String],
) -> Result<(), PuzzleError> {
    if clues.is_empty() || clues.len() == expected {
        Ok(())
    } else {
        Err(PuzzleError::ClueCount {
            kind,
            expected,
            found: clues.len(),
        })
    }
}

/// Whether some adjacent pair holds different letters
fn has_effective_swap(grid: &Grid) -> bool {
    grid.positions().any(|pos| {
        let right = Position::new(pos.row, pos.col + 1);
        let down = Position::new(pos.row + 1, pos.col);
        (grid.contains(right) && grid.get(right) != grid.get(pos))
            || (grid.contains(down) && grid.get(down) != grid.get(pos))
    })
}
