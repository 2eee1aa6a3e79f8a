//! Public data models for generated mazes, pickups, and patrol enemies.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{CollectibleKind, Direction, Pos};

use super::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Pos,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn points(&self) -> u32 {
        self.kind.points()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeFragment {
    pub pos: Pos,
}

/// An enemy moving back and forth on a straight horizontal or vertical segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatrolEnemy {
    pub id: u32,
    pub start: Pos,
    pub end: Pos,
    /// Cells per second.
    pub speed: f64,
}

impl PatrolEnemy {
    pub fn length(&self) -> f64 {
        let dx = f64::from(self.end.x - self.start.x);
        let dy = f64::from(self.end.y - self.start.y);
        dx.hypot(dy)
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    /// Cells covered by the segment, from `start` to `end`.
    pub fn cells(&self) -> Vec<Pos> {
        let steps = self.start.chebyshev(self.end) as i32;
        let dx = (self.end.x - self.start.x).signum();
        let dy = (self.end.y - self.start.y).signum();
        (0..=steps).map(|step| Pos::new(self.start.x + dx * step, self.start.y + dy * step)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    pub(crate) level: u32,
    pub(crate) grid: Grid,
    pub(crate) entry: Pos,
    pub(crate) exit: Pos,
    pub(crate) collectibles: Vec<Collectible>,
    pub(crate) time_fragments: Vec<TimeFragment>,
    pub(crate) patrol_enemies: Vec<PatrolEnemy>,
}

impl Maze {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn entry(&self) -> Pos {
        self.entry
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn time_fragments(&self) -> &[TimeFragment] {
        &self.time_fragments
    }

    pub fn patrol_enemies(&self) -> &[PatrolEnemy] {
        &self.patrol_enemies
    }

    /// Movement gate for the player: false outside the grid, otherwise whether the wall on
    /// `direction` has been carved away.
    pub fn can_move(&self, x: i32, y: i32, direction: Direction) -> bool {
        self.grid.is_open(Pos::new(x, y), direction)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.level.to_le_bytes());
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for cell in self.grid.cells() {
            let walls = cell.walls;
            bytes.push(
                u8::from(walls.top)
                    | u8::from(walls.right) << 1
                    | u8::from(walls.bottom) << 2
                    | u8::from(walls.left) << 3,
            );
        }
        for pos in [self.entry, self.exit] {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }

        bytes.extend((self.collectibles.len() as u32).to_le_bytes());
        for collectible in &self.collectibles {
            bytes.push(match collectible.kind {
                CollectibleKind::Namaz => 0,
                CollectibleKind::Tesbih => 1,
                CollectibleKind::Zikir => 2,
                CollectibleKind::Kuran => 3,
            });
            bytes.extend(collectible.pos.y.to_le_bytes());
            bytes.extend(collectible.pos.x.to_le_bytes());
        }

        bytes.extend((self.time_fragments.len() as u32).to_le_bytes());
        for fragment in &self.time_fragments {
            bytes.extend(fragment.pos.y.to_le_bytes());
            bytes.extend(fragment.pos.x.to_le_bytes());
        }

        bytes.extend((self.patrol_enemies.len() as u32).to_le_bytes());
        for enemy in &self.patrol_enemies {
            bytes.extend(enemy.id.to_le_bytes());
            for pos in [enemy.start, enemy.end] {
                bytes.extend(pos.y.to_le_bytes());
                bytes.extend(pos.x.to_le_bytes());
            }
            bytes.extend(enemy.speed.to_bits().to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_maze() -> Maze {
        let mut grid = Grid::new(3, 2);
        grid.carve(Pos::new(0, 0), Direction::Right);
        grid.carve(Pos::new(1, 0), Direction::Right);
        grid.carve(Pos::new(2, 0), Direction::Down);
        grid.carve(Pos::new(2, 1), Direction::Left);
        grid.carve(Pos::new(1, 1), Direction::Left);
        Maze {
            level: 1,
            grid,
            entry: Pos::new(0, 0),
            exit: Pos::new(0, 1),
            collectibles: Vec::new(),
            time_fragments: Vec::new(),
            patrol_enemies: Vec::new(),
        }
    }

    #[test]
    fn can_move_follows_wall_flags() {
        let maze = corridor_maze();
        assert!(maze.can_move(0, 0, Direction::Right));
        assert!(!maze.can_move(0, 0, Direction::Down));
        assert!(maze.can_move(2, 0, Direction::Down));
        assert!(!maze.can_move(0, 1, Direction::Up));
    }

    #[test]
    fn can_move_is_false_outside_the_grid() {
        let maze = corridor_maze();
        assert!(!maze.can_move(-1, 0, Direction::Right));
        assert!(!maze.can_move(3, 0, Direction::Left));
        assert!(!maze.can_move(0, 2, Direction::Up));
    }

    #[test]
    fn fingerprint_tracks_layout_changes() {
        let maze = corridor_maze();
        let mut moved_exit = maze.clone();
        moved_exit.exit = Pos::new(1, 1);
        assert_eq!(maze.fingerprint(), corridor_maze().fingerprint());
        assert_ne!(maze.fingerprint(), moved_exit.fingerprint());
    }

    #[test]
    fn patrol_segment_lists_every_covered_cell() {
        let enemy = PatrolEnemy { id: 0, start: Pos::new(1, 4), end: Pos::new(1, 1), speed: 1.0 };
        assert!(!enemy.is_horizontal());
        assert_eq!(enemy.length(), 3.0);
        assert_eq!(
            enemy.cells(),
            vec![Pos::new(1, 4), Pos::new(1, 3), Pos::new(1, 2), Pos::new(1, 1)]
        );
    }
}
