pub mod config;
pub mod mapgen;
pub mod motion;
pub mod screen;
pub mod session;
pub mod types;

pub use config::{ConfigLoadError, GenerationConfig, MazeConfigFile};
pub use mapgen::{
    Collectible, Maze, MazeGenerator, PatrolEnemy, RandomSource, TimeFragment, generate_maze,
};
pub use motion::enemy_position;
pub use screen::cell_to_screen;
pub use session::{MazeRun, RunError, RunEvent, RunRules, RunStatus};
pub use types::*;

/// Movement gate for the input layer: false outside the grid, otherwise whether the wall on
/// `direction` of cell `(x, y)` is open.
pub fn can_move(maze: &Maze, x: i32, y: i32, direction: Direction) -> bool {
    maze.can_move(x, y, direction)
}
