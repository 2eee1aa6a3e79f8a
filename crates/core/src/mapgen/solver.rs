//! Breadth-first distances over carved passages and farthest-cell selection.

use std::collections::VecDeque;

use crate::types::Pos;

use super::grid::Grid;

/// BFS distance from `start` to every cell, `None` where unreachable.
pub fn distance_map(grid: &Grid, start: Pos) -> Vec<Option<u32>> {
    let mut distances = vec![None; grid.len()];
    for (pos, distance) in breadth_first(grid, start) {
        distances[grid.index(pos)] = Some(distance);
    }
    distances
}

/// First cell reached at the greatest BFS depth from `start`, with that depth.
pub fn farthest_cell(grid: &Grid, start: Pos) -> (Pos, u32) {
    breadth_first(grid, start)
        .into_iter()
        .fold((start, 0), |best, visit| if visit.1 > best.1 { visit } else { best })
}

/// Cells in visit order, neighbours expanded up, right, down, left.
fn breadth_first(grid: &Grid, start: Pos) -> Vec<(Pos, u32)> {
    if !grid.in_bounds(start) {
        return Vec::new();
    }

    let mut seen = vec![false; grid.len()];
    seen[grid.index(start)] = true;
    let mut order = Vec::with_capacity(grid.len());
    let mut open = VecDeque::from([(start, 0_u32)]);
    while let Some((pos, distance)) = open.pop_front() {
        order.push((pos, distance));
        for next in grid.open_neighbours(pos) {
            let index = grid.index(next);
            if !seen[index] {
                seen[index] = true;
                open.push_back((next, distance + 1));
            }
        }
    }
    order
}
