//! Collectible and time-fragment placement on dead ends and corners.

use tracing::trace;

use crate::types::{CollectibleKind, Pos};

use super::grid::Grid;
use super::model::{Collectible, TimeFragment};
use super::progression;
use super::random::{RandomSource, WeightedTable, shuffle};

pub(super) struct PlacementContext<'a> {
    pub(super) grid: &'a Grid,
    pub(super) entry: Pos,
    pub(super) exit: Pos,
    pub(super) level: u32,
    pub(super) kinds: Option<&'a WeightedTable<CollectibleKind>>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Placement {
    pub(super) collectibles: Vec<Collectible>,
    pub(super) time_fragments: Vec<TimeFragment>,
}

/// Candidate cells split by shape, in row-major order, away from entry and exit.
pub(super) fn classify_candidates(grid: &Grid, entry: Pos, exit: Pos) -> (Vec<Pos>, Vec<Pos>) {
    let mut dead_ends = Vec::new();
    let mut corners = Vec::new();
    for cell in grid.cells() {
        if cell.pos.chebyshev(entry) <= 1 || cell.pos.chebyshev(exit) <= 1 {
            continue;
        }
        if cell.is_dead_end() {
            dead_ends.push(cell.pos);
        } else if cell.is_corner() {
            corners.push(cell.pos);
        }
    }
    (dead_ends, corners)
}

pub(super) fn place_items(context: &PlacementContext<'_>, rng: &mut dyn RandomSource) -> Placement {
    let (mut dead_ends, mut corners) = classify_candidates(context.grid, context.entry, context.exit);
    shuffle(rng, &mut dead_ends);
    shuffle(rng, &mut corners);

    let fragment_quota = progression::time_fragment_count(context.level);
    let fragment_take = fragment_quota.min(dead_ends.len());
    let time_fragments: Vec<TimeFragment> =
        dead_ends.drain(..fragment_take).map(|pos| TimeFragment { pos }).collect();
    if time_fragments.len() < fragment_quota {
        trace!(
            placed = time_fragments.len(),
            quota = fragment_quota,
            "not enough dead ends for time fragments"
        );
    }

    let collectible_quota = progression::collectible_count(context.level);
    let Some(kinds) = context.kinds else {
        return Placement { collectibles: Vec::new(), time_fragments };
    };
    let collectibles: Vec<Collectible> = dead_ends
        .into_iter()
        .chain(corners)
        .take(collectible_quota)
        .map(|pos| Collectible { pos, kind: *kinds.sample(rng) })
        .collect();
    if collectibles.len() < collectible_quota {
        trace!(
            placed = collectibles.len(),
            quota = collectible_quota,
            "not enough dead ends and corners for collectibles"
        );
    }

    Placement { collectibles, time_fragments }
}
