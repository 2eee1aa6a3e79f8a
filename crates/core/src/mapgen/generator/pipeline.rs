//! Maze-construction pipeline that composes the mapgen stages.

use tracing::debug;

use crate::config::GenerationConfig;

use super::super::carve::carve_backtracking;
use super::super::grid::Grid;
use super::super::model::Maze;
use super::super::patrols::{PatrolContext, place_patrols};
use super::super::placement::{PlacementContext, place_items};
use super::super::progression;
use super::super::random::RandomSource;
use super::super::solver::farthest_cell;
use super::ENTRY_CELL;

pub(super) fn build_maze(
    config: &GenerationConfig,
    width: usize,
    height: usize,
    level: u32,
    rng: &mut dyn RandomSource,
) -> Maze {
    let mut grid = Grid::new(width, height);
    let entry = ENTRY_CELL;
    carve_backtracking(&mut grid, entry, rng);
    let (exit, exit_distance) = farthest_cell(&grid, entry);

    let kinds = config.collectible_table();
    let placement = place_items(
        &PlacementContext { grid: &grid, entry, exit, level, kinds: kinds.as_ref() },
        rng,
    );
    let patrol_enemies = place_patrols(
        &PatrolContext {
            grid: &grid,
            entry,
            exit,
            count: progression::patrol_enemy_count(level),
            horizontal_speed: config.horizontal_patrol_speed.as_range(),
            vertical_speed: config.vertical_patrol_speed.as_range(),
        },
        rng,
    );

    debug!(
        width = grid.width(),
        height = grid.height(),
        level,
        exit_x = exit.x,
        exit_y = exit.y,
        exit_distance,
        collectibles = placement.collectibles.len(),
        time_fragments = placement.time_fragments.len(),
        patrols = patrol_enemies.len(),
        "generated maze"
    );

    Maze {
        level,
        grid,
        entry,
        exit,
        collectibles: placement.collectibles,
        time_fragments: placement.time_fragments,
        patrol_enemies,
    }
}
