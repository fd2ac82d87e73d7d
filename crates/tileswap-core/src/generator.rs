use crate::error::GenerateError;
use crate::{rules, Direction, Grid, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default turn budget for a play-through
pub const DEFAULT_MAX_TURNS: usize = 6;

/// How the starting board is jumbled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleStrategy {
    /// Random adjacent swaps, retried until the result is not solved
    #[default]
    RandomWalk,
    /// A hand-picked list of adjacent swaps applied in order
    Curated(Vec<(Position, Position)>),
}

/// Configuration for jumble generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Jumble strategy
    pub strategy: ShuffleStrategy,
    /// Number of swaps applied, which is also the player's turn budget
    pub max_turns: usize,
    /// Random walks tried before giving up
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: ShuffleStrategy::RandomWalk,
            max_turns: DEFAULT_MAX_TURNS,
            max_attempts: 1000,
        }
    }
}

impl GeneratorConfig {
    pub fn random_walk(max_turns: usize) -> Self {
        Self {
            max_turns,
            ..Self::default()
        }
    }

    /// Curated sequence; the turn budget is the sequence length
    pub fn curated(swaps: Vec<(Position, Position)>) -> Self {
        Self {
            max_turns: swaps.len(),
            strategy: ShuffleStrategy::Curated(swaps),
            ..Self::default()
        }
    }
}

/// A jumbled board and the swaps that produced it from the solved grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shuffle {
    pub grid: Grid,
    pub swaps: Vec<(Position, Position)>,
}

impl Shuffle {
    /// Replay the swaps in reverse order, which walks back to the solved
    /// grid in `swaps.len()` moves.
    pub fn unscramble(&self) -> Grid {
        let mut grid = self.grid.clone();
        for &(a, b) in self.swaps.iter().rev() {
            grid.swap(a, b);
        }
        grid
    }
}

/// Jumble generator
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config_and_seed(GeneratorConfig::default(), seed)
    }

    pub fn with_config_and_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn max_turns(&self) -> usize {
        self.config.max_turns
    }

    /// Jumble `solved` into a board exactly `max_turns` legal swaps away
    /// that is not itself solved.
    pub fn generate(&mut self, solved: &Grid) -> Result<Shuffle, GenerateError> {
        if self.config.max_turns == 0 {
            return Err(GenerateError::ZeroTurns);
        }
        if solved.rows() * solved.cols() < 2 {
            return Err(GenerateError::NoLegalSwap);
        }

        let shuffle = match &self.config.strategy {
            ShuffleStrategy::RandomWalk => self.random_walk(solved)?,
            ShuffleStrategy::Curated(swaps) => {
                apply_curated(solved, swaps, self.config.max_turns)?
            }
        };

        info!(turns = shuffle.swaps.len(), "jumbled puzzle");
        Ok(shuffle)
    }

    fn random_walk(&mut self, solved: &Grid) -> Result<Shuffle, GenerateError> {
        for attempt in 1..=self.config.max_attempts {
            let mut grid = solved.clone();
            let mut swaps = Vec::with_capacity(self.config.max_turns);

            for _ in 0..self.config.max_turns {
                let (from, to) = self.random_swap(solved.rows(), solved.cols());
                grid.swap(from, to);
                swaps.push((from, to));
            }

            // Swaps are self-inverse, so a short walk can cancel itself out
            if grid != *solved {
                debug!(
                    attempt,
                    displaced = grid.diff_count(solved),
                    "random walk accepted"
                );
                return Ok(Shuffle { grid, swaps });
            }
            warn!(attempt, "random walk landed on the solved grid, retrying");
        }

        Err(GenerateError::AttemptsExhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Pick a random cell and a random cardinal neighbour inside the grid
    fn random_swap(&mut self, rows: usize, cols: usize) -> (Position, Position) {
        loop {
            let from = Position::new(self.rng.gen_range(0..rows), self.rng.gen_range(0..cols));
            let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            if let Some(to) = from.step(direction, rows, cols) {
                return (from, to);
            }
        }
    }
}

fn apply_curated(
    solved: &Grid,
    swaps: &[(Position, Position)],
    max_turns: usize,
) -> Result<Shuffle, GenerateError> {
    if swaps.len() != max_turns {
        return Err(GenerateError::SequenceLength {
            expected: max_turns,
            found: swaps.len(),
        });
    }

    let mut grid = solved.clone();
    for (index, &(from, to)) in swaps.iter().enumerate() {
        if !grid.contains(from) || !grid.contains(to) || !rules::is_legal(from, to) {
            return Err(GenerateError::IllegalSwap { index, from, to });
        }
        grid.swap(from, to);
    }

    if grid == *solved {
        return Err(GenerateError::SequenceSolves);
    }

    Ok(Shuffle {
        grid,
        swaps: swaps.to_vec(),
    })
}
