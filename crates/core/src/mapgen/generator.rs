//! High-level maze generation entry points over the seeded or injected random source.

mod pipeline;

use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

use crate::config::GenerationConfig;
use crate::types::Pos;

use super::model::Maze;
use super::progression::maze_dimensions;
use super::random::RandomSource;
use super::seed::derive_level_seed;

/// Entry cell of every maze: the top-left corner.
pub const ENTRY_CELL: Pos = Pos::new(0, 0);

#[derive(Clone, Debug, Default)]
pub struct MazeGenerator {
    run_seed: u64,
    config: GenerationConfig,
}

impl MazeGenerator {
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed, config: GenerationConfig::default() }
    }

    pub fn with_config(run_seed: u64, config: GenerationConfig) -> Self {
        Self { run_seed, config }
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Reproducible maze for `(run_seed, level)` at the given size.
    pub fn generate(&self, width: usize, height: usize, level: u32) -> Maze {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_level_seed(self.run_seed, level));
        self.generate_with(width, height, level, &mut rng)
    }

    /// Reproducible maze sized by the level's progression rules.
    pub fn generate_level(&self, level: u32) -> Maze {
        let (width, height) = maze_dimensions(level);
        self.generate(width, height, level)
    }

    /// Maze driven by a caller-supplied source.
    pub fn generate_with(
        &self,
        width: usize,
        height: usize,
        level: u32,
        rng: &mut dyn RandomSource,
    ) -> Maze {
        pipeline::build_maze(&self.config, width, height, level, rng)
    }
}
