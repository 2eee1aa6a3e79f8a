//! Cell lattice primitives: wall flags, bounds checks, and wall-pair carving.

use serde::{Deserialize, Serialize};

use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const CLOSED: Self = Self { top: true, right: true, bottom: true, left: true };

    pub fn has(self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    fn clear(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.top = false,
            Direction::Right => self.right = false,
            Direction::Down => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }

    /// Number of open sides, i.e. the cell's degree in the passage graph.
    pub fn open_count(self) -> usize {
        Direction::ALL.into_iter().filter(|&direction| !self.has(direction)).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Pos,
    pub walls: Walls,
}

impl Cell {
    pub fn degree(&self) -> usize {
        self.walls.open_count()
    }

    pub fn is_dead_end(&self) -> bool {
        self.degree() == 1
    }

    /// Two open sides that meet at a right angle.
    pub fn is_corner(&self) -> bool {
        let walls = self.walls;
        self.degree() == 2 && walls.top != walls.bottom && walls.left != walls.right
    }
}

/// Row-major arena of cells with a fixed size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a fully walled grid. Zero dimensions are clamped to one cell.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell { pos: Pos::new(x as i32, y as i32), walls: Walls::CLOSED });
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        let start = y.checked_mul(self.width)?;
        self.cells.get(start..start + self.width)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// True when `pos` is inside the grid and its wall on `direction` is cleared.
    pub fn is_open(&self, pos: Pos, direction: Direction) -> bool {
        self.cell(pos).is_some_and(|cell| !cell.walls.has(direction))
    }

    pub fn open_neighbours(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.is_open(pos, direction))
            .filter_map(move |direction| self.neighbour(pos, direction))
    }

    /// Count of cleared wall pairs between adjacent cells.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let right = cell.pos.x as usize + 1 < self.width && !cell.walls.right;
                let down = cell.pos.y as usize + 1 < self.height && !cell.walls.bottom;
                usize::from(right) + usize::from(down)
            })
            .sum()
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub(crate) fn pos_at(&self, index: usize) -> Pos {
        Pos::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub(crate) fn neighbour(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        let next = pos.step(direction);
        self.in_bounds(next).then_some(next)
    }

    /// Clears the wall pair between `pos` and its neighbour on `direction`.
    /// Returns false, leaving the grid untouched, when the neighbour is outside.
    pub(crate) fn carve(&mut self, pos: Pos, direction: Direction) -> bool {
        let Some(next) = self.neighbour(pos, direction) else {
            return false;
        };
        let (a, b) = (self.index(pos), self.index(next));
        self.cells[a].walls.clear(direction);
        self.cells[b].walls.clear(direction.opposite());
        true
    }
}
