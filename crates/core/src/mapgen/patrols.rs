//! Straight-corridor detection and patrol enemy placement.

use std::ops::Range;

use tracing::trace;

use crate::types::{Direction, Pos};

use super::grid::Grid;
use super::model::PatrolEnemy;
use super::random::RandomSource;

/// Shortest corridor, in cells, that can host a patrol.
pub const MIN_PATROL_RUN_CELLS: usize = 3;

pub(super) struct PatrolContext<'a> {
    pub(super) grid: &'a Grid,
    pub(super) entry: Pos,
    pub(super) exit: Pos,
    pub(super) count: usize,
    pub(super) horizontal_speed: Range<f64>,
    pub(super) vertical_speed: Range<f64>,
}

impl PatrolContext<'_> {
    fn is_guarded(&self, pos: Pos) -> bool {
        pos.chebyshev(self.entry) <= 1 || pos.chebyshev(self.exit) <= 1
    }
}

/// Claims at most one run per row, top to bottom, then one per column, left to right,
/// until `count` patrols exist.
pub(super) fn place_patrols(
    context: &PatrolContext<'_>,
    rng: &mut dyn RandomSource,
) -> Vec<PatrolEnemy> {
    let mut enemies = Vec::with_capacity(context.count);
    let grid = context.grid;

    for y in 0..grid.height() {
        if enemies.len() >= context.count {
            break;
        }
        let line: Vec<Pos> = (0..grid.width()).map(|x| Pos::new(x as i32, y as i32)).collect();
        if let Some((start, end)) = first_open_run(context, &line, Direction::Right) {
            let speed = rng.range(context.horizontal_speed.clone());
            enemies.push(PatrolEnemy { id: enemies.len() as u32, start, end, speed });
        }
    }

    for x in 0..grid.width() {
        if enemies.len() >= context.count {
            break;
        }
        let line: Vec<Pos> = (0..grid.height()).map(|y| Pos::new(x as i32, y as i32)).collect();
        if let Some((start, end)) = first_open_run(context, &line, Direction::Down) {
            let speed = rng.range(context.vertical_speed.clone());
            enemies.push(PatrolEnemy { id: enemies.len() as u32, start, end, speed });
        }
    }

    if enemies.len() < context.count {
        trace!(placed = enemies.len(), quota = context.count, "not enough straight corridors");
    }
    enemies
}

/// First run along `line` of cells joined through their `direction` wall, skipping guarded
/// cells, that spans at least [`MIN_PATROL_RUN_CELLS`].
fn first_open_run(
    context: &PatrolContext<'_>,
    line: &[Pos],
    direction: Direction,
) -> Option<(Pos, Pos)> {
    let mut run_start = None;
    for (index, &pos) in line.iter().enumerate() {
        if context.is_guarded(pos) {
            run_start = None;
            continue;
        }
        let start = *run_start.get_or_insert(index);
        let continues = line.get(index + 1).is_some_and(|&next| {
            context.grid.is_open(pos, direction) && !context.is_guarded(next)
        });
        if continues {
            continue;
        }
        if index + 1 - start >= MIN_PATROL_RUN_CELLS {
            return Some((line[start], pos));
        }
        run_start = None;
    }
    None
}
