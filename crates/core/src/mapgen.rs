//! Procedural maze generation split into carving, solving, and placement stages.

pub mod grid;
pub mod model;
pub mod progression;
pub mod random;
pub mod solver;

mod carve;
mod generator;
mod patrols;
mod placement;
mod seed;

pub use generator::{ENTRY_CELL, MazeGenerator};
pub use grid::{Cell, Grid, Walls};
pub use model::{Collectible, Maze, PatrolEnemy, TimeFragment};
pub use patrols::MIN_PATROL_RUN_CELLS;
pub use random::{RandomSource, ScriptedRandom, WeightedTable, shuffle};
pub use seed::{derive_level_seed, runtime_seed};

/// Fresh maze with run-to-run variety; use [`MazeGenerator`] for reproducible output.
pub fn generate_maze(width: usize, height: usize, level: u32) -> Maze {
    MazeGenerator::new(runtime_seed()).generate(width, height, level)
}
