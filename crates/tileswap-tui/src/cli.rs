use crate::theme::ThemeName;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tileswap_core::{
    Generator, GeneratorConfig, Puzzle, PuzzleDefinition, Session, DEFAULT_MAX_TURNS,
};

/// Restore the word grid by swapping neighbouring tiles
#[derive(Debug, Parser)]
#[command(name = "tileswap", version, about)]
pub struct Args {
    /// Puzzle definition (JSON). Uses the built-in sample when omitted
    #[arg(short, long, value_name = "FILE")]
    pub puzzle: Option<PathBuf>,

    /// Turn budget, which is also the number of jumble swaps
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_TURNS, value_parser = parse_turns)]
    pub max_turns: usize,

    /// Seed for a reproducible jumble
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Color theme
    #[arg(short, long, value_enum, default_value_t = ThemeName::Dark)]
    pub theme: ThemeName,

    /// Print the starting state as JSON and exit
    #[arg(long)]
    pub print_state: bool,
}

impl Args {
    /// Load the puzzle and start a session from the parsed arguments
    pub fn build_session(&self) -> Result<Session> {
        let puzzle = match &self.puzzle {
            Some(path) => load_puzzle(path)?,
            None => Puzzle::sample(),
        };

        let config = GeneratorConfig::random_walk(self.max_turns);
        let generator = match self.seed {
            Some(seed) => Generator::with_config_and_seed(config, seed),
            None => Generator::with_config(config),
        };

        Session::with_generator(puzzle, generator).context("failed to start puzzle session")
    }
}

const WORDS_FORM: &str = r#"{"words": [{"word": "...", "clue": "..."}, ...]}"#;
const GRID_FORM: &str = r#"{"grid": ["...", ...], "row_clues": [...], "column_clues": [...]}"#;

fn parse_turns(s: &str) -> Result<usize, String> {
    let turns: usize = s.parse().map_err(|e| format!("{e}"))?;
    if (1..=64).contains(&turns) {
        Ok(turns)
    } else {
        Err("turn budget must be between 1 and 64".to_string())
    }
}

/// Read and validate a puzzle definition file
pub fn load_puzzle(path: &Path) -> Result<Puzzle> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read puzzle file {}", path.display()))?;
    let definition: PuzzleDefinition = serde_json::from_str(&json).with_context(|| {
        format!(
            "failed to parse puzzle file {}: expected {} or {}",
            path.display(),
            WORDS_FORM,
            GRID_FORM
        )
    })?;
    Puzzle::new(definition).with_context(|| format!("invalid puzzle in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["tileswap"]);
        assert_eq!(args.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(args.theme, ThemeName::Dark);
        assert!(args.puzzle.is_none());
        assert!(!args.print_state);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "tileswap",
            "--max-turns",
            "4",
            "--seed",
            "9",
            "--theme",
            "high-contrast",
            "--print-state",
        ]);
        assert_eq!(args.max_turns, 4);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.theme, ThemeName::HighContrast);
        assert!(args.print_state);
    }

    #[test]
    fn test_zero_turns_rejected() {
        assert!(Args::try_parse_from(["tileswap", "--max-turns", "0"]).is_err());
    }

    #[test]
    fn test_seeded_session_is_reproducible() {
        let args = Args::parse_from(["tileswap", "--seed", "12"]);
        let a = args.build_session().unwrap();
        let b = args.build_session().unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.max_turns(), DEFAULT_MAX_TURNS);
    }

    #[test]
    fn test_load_puzzle_file() {
        let path = std::env::temp_dir().join(format!("tileswap-test-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"grid": ["CAT", "ARE", "TEN"], "row_clues": ["pet", "exist", "decade"]}"#,
        )
        .unwrap();
        let puzzle = load_puzzle(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(puzzle.size(), 3);
        assert_eq!(puzzle.clue_text(), "pet, exist, decade");
    }

    #[test]
    fn test_load_puzzle_with_unknown_shape() {
        let path = std::env::temp_dir().join(format!("tileswap-bad-{}.json", std::process::id()));
        fs::write(&path, r#"{"rows": ["CAT", "ARE", "TEN"]}"#).unwrap();
        let err = load_puzzle(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        let message = err.to_string();
        assert!(message.contains("failed to parse puzzle file"));
        assert!(message.contains(r#"{"words":"#));
        assert!(message.contains(r#"{"grid":"#));
    }

    #[test]
    fn test_load_missing_puzzle_file() {
        let err = load_puzzle(Path::new("/nonexistent/tileswap.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read puzzle file"));
    }
}
