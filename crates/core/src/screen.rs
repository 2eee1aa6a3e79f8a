//! Cell-space to screen-space mapping for whatever surface draws the maze.

use crate::types::{EnemyPose, ScreenPoint};

/// Centre of cell `(cell_x, cell_y)` on a surface where cells are `cell_size` wide and the
/// grid origin sits at `(offset_x, offset_y)`.
pub fn cell_to_screen(
    cell_x: i32,
    cell_y: i32,
    cell_size: f32,
    offset_x: f32,
    offset_y: f32,
) -> ScreenPoint {
    position_to_screen(cell_x as f32, cell_y as f32, cell_size, offset_x, offset_y)
}

/// Same mapping for fractional cell coordinates such as patrol poses.
pub fn position_to_screen(
    x: f32,
    y: f32,
    cell_size: f32,
    offset_x: f32,
    offset_y: f32,
) -> ScreenPoint {
    ScreenPoint {
        x: offset_x + x * cell_size + cell_size / 2.0,
        y: offset_y + y * cell_size + cell_size / 2.0,
    }
}

pub fn pose_to_screen(pose: EnemyPose, cell_size: f32, offset_x: f32, offset_y: f32) -> ScreenPoint {
    position_to_screen(pose.x as f32, pose.y as f32, cell_size, offset_x, offset_y)
}
