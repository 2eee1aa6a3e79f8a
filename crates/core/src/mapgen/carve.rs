//! Randomized depth-first backtracking that turns a walled grid into a perfect maze.

use crate::types::{Direction, Pos};

use super::grid::Grid;
use super::random::RandomSource;

/// Carves a spanning tree rooted at `start`. Every cell ends up visited exactly once, so the
/// grid gains exactly `len - 1` passages.
pub(super) fn carve_backtracking(grid: &mut Grid, start: Pos, rng: &mut dyn RandomSource) {
    if !grid.in_bounds(start) {
        return;
    }

    let mut visited = vec![false; grid.len()];
    let mut stack = Vec::with_capacity(grid.len());
    let start_index = grid.index(start);
    visited[start_index] = true;
    stack.push(start_index);

    while let Some(&current_index) = stack.last() {
        let current = grid.pos_at(current_index);

        let mut candidates = [Direction::Up; 4];
        let mut candidate_count = 0usize;
        for direction in Direction::ALL {
            let Some(next) = grid.neighbour(current, direction) else {
                continue;
            };
            if !visited[grid.index(next)] {
                candidates[candidate_count] = direction;
                candidate_count += 1;
            }
        }

        if candidate_count == 0 {
            stack.pop();
            continue;
        }

        let direction = candidates[rng.below(candidate_count)];
        let next = current.step(direction);
        grid.carve(current, direction);
        let next_index = grid.index(next);
        visited[next_index] = true;
        stack.push(next_index);
    }
}
