//! Grid coordinates, direction vectors, and the geometric primitives built on them.
//!
//! Cells are addressed as `(row, col)` with row growing downward. The actor always
//! stands on [`Grid::center`].

pub mod line;
pub mod offsets;
pub mod shapes;

pub use line::{segment_intersects_cell, trace_line};
pub use offsets::{Offset, Symmetry, orient_offsets, symmetrize, translate_offsets};
pub use shapes::{
    StepRange, cells_within_radius, directional_cone, directional_line, line_union,
    perpendicular_line,
};

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::GridConfig;

/// A grid cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Moves `steps` unit steps along `direction`.
    pub const fn step(self, direction: Direction, steps: i32) -> Self {
        self.offset(direction.row * steps, direction.col * steps)
    }

    /// `(d_row, d_col)` from `origin` to this cell.
    pub const fn delta_from(self, origin: Cell) -> (i32, i32) {
        (self.row - origin.row, self.col - origin.col)
    }

    pub fn manhattan(self, other: Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A unit step: one of the 4 cardinal or 4 diagonal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    pub row: i32,
    pub col: i32,
}

/// Up to eight directions in a fixed iteration order.
pub type DirectionSet = ArrayVec<Direction, 8>;

impl Direction {
    pub const NORTH: Self = Self::new(-1, 0);
    pub const SOUTH: Self = Self::new(1, 0);
    pub const WEST: Self = Self::new(0, -1);
    pub const EAST: Self = Self::new(0, 1);
    pub const NORTH_WEST: Self = Self::new(-1, -1);
    pub const NORTH_EAST: Self = Self::new(-1, 1);
    pub const SOUTH_WEST: Self = Self::new(1, -1);
    pub const SOUTH_EAST: Self = Self::new(1, 1);

    pub const CARDINAL: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::WEST, Self::EAST];
    pub const DIAGONAL: [Self; 4] = [
        Self::NORTH_WEST,
        Self::NORTH_EAST,
        Self::SOUTH_WEST,
        Self::SOUTH_EAST,
    ];

    const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Sign-normalized direction of a delta, or `None` for the zero vector.
    pub fn toward(d_row: i32, d_col: i32) -> Option<Self> {
        if d_row == 0 && d_col == 0 {
            return None;
        }
        Some(Self::new(d_row.signum(), d_col.signum()))
    }

    /// Quarter turn: `(row, col) -> (-col, row)`.
    pub const fn rotate90(self) -> Self {
        Self::new(-self.col, self.row)
    }

    pub const fn is_diagonal(self) -> bool {
        self.row != 0 && self.col != 0
    }

    /// Dot product with `(d_row, d_col)` divided by this direction's length.
    ///
    /// Diagonals are scaled down so they compete fairly with cardinals.
    pub fn alignment(self, d_row: i32, d_col: i32) -> f64 {
        let dot = (self.row * d_row + self.col * d_col) as f64;
        let length = ((self.row * self.row + self.col * self.col) as f64).sqrt();
        if length == 0.0 { 0.0 } else { dot / length }
    }

    pub fn cardinal() -> DirectionSet {
        Self::CARDINAL.into_iter().collect()
    }

    pub fn diagonal() -> DirectionSet {
        Self::DIAGONAL.into_iter().collect()
    }

    /// Cardinals first, then diagonals.
    pub fn all_eight() -> DirectionSet {
        Self::CARDINAL
            .into_iter()
            .chain(Self::DIAGONAL)
            .collect()
    }
}

/// The fixed square preview grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: i32,
}

impl Grid {
    /// Creates a grid; even or non-positive sizes are bumped to the next odd size.
    pub fn new(size: i32) -> Self {
        let size = size.max(1);
        Self {
            size: if size % 2 == 0 { size + 1 } else { size },
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.size)
    }

    pub const fn size(&self) -> i32 {
        self.size
    }

    pub const fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.size && cell.col >= 0 && cell.col < self.size
    }

    /// All cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Cell::new(row, col)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

/// Pushes `cell` unless it was already recorded, preserving first-seen order.
pub(crate) fn push_unique(
    cells: &mut Vec<Cell>,
    seen: &mut std::collections::HashSet<Cell>,
    cell: Cell,
) {
    if seen.insert(cell) {
        cells.push(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_grid_is_centered() {
        let grid = Grid::default();
        assert_eq!(grid.size(), 15);
        assert_eq!(grid.center(), Cell::new(7, 7));
        assert!(grid.contains(Cell::new(14, 0)));
        assert!(!grid.contains(Cell::new(15, 0)));
        assert!(!grid.contains(Cell::new(0, -1)));
        assert_eq!(grid.cells().count(), 225);
    }

    #[test]
    fn even_sizes_are_rounded_up_to_odd() {
        assert_eq!(Grid::new(8).size(), 9);
        assert_eq!(Grid::new(0).size(), 1);
    }

    #[test]
    fn direction_toward_normalizes_signs() {
        assert_eq!(Direction::toward(-3, 0), Some(Direction::NORTH));
        assert_eq!(Direction::toward(2, -5), Some(Direction::SOUTH_WEST));
        assert_eq!(Direction::toward(0, 0), None);
    }

    #[test]
    fn rotate90_cycles_through_cardinals() {
        assert_eq!(Direction::NORTH.rotate90(), Direction::WEST);
        assert_eq!(Direction::EAST.rotate90(), Direction::NORTH);
        assert_eq!(
            Direction::NORTH.rotate90().rotate90().rotate90().rotate90(),
            Direction::NORTH
        );
    }

    #[test]
    fn alignment_prefers_the_matching_direction() {
        let straight = Direction::NORTH.alignment(-3, -1);
        let opposite = Direction::SOUTH.alignment(-3, -1);
        assert!(straight > opposite);
        assert!(opposite < 0.0);

        let diagonal = Direction::NORTH_WEST.alignment(-2, -2);
        assert!(diagonal > Direction::NORTH.alignment(-2, -2));
    }

    #[test]
    fn distances() {
        let a = Cell::new(7, 7);
        let b = Cell::new(4, 9);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(a.chebyshev(b), 3);
        assert_eq!(b.delta_from(a), (-3, 2));
    }
}
