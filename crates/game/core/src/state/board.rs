//! The preview grid together with its live obstacle set.

use std::collections::BTreeSet;

use crate::config::GridConfig;
use crate::grid::{Cell, Grid, segment_intersects_cell, trace_line};

/// Grid plus blocked cells. The actor's cell can never be blocked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    obstacles: BTreeSet<Cell>,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            obstacles: BTreeSet::new(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn center(&self) -> Cell {
        self.grid.center()
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.obstacles.iter().copied()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Blocks `cell`. Off-grid cells and the actor's cell are refused.
    pub fn block(&mut self, cell: Cell) -> bool {
        if !self.grid.contains(cell) || cell == self.center() {
            return false;
        }
        self.obstacles.insert(cell)
    }

    pub fn unblock(&mut self, cell: Cell) -> bool {
        self.obstacles.remove(&cell)
    }

    /// Flips `cell` and returns whether it is now blocked.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.unblock(cell) {
            return false;
        }
        self.block(cell)
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Adds the fixed sample layout around the actor, keeping existing obstacles.
    pub fn apply_sample(&mut self) {
        let center = self.center();
        for (d_row, d_col) in GridConfig::SAMPLE_OBSTACLES {
            self.block(center.offset(d_row, d_col));
        }
    }

    /// Canonical serialization of the obstacle content, used as a cache key.
    pub fn fingerprint(&self) -> String {
        self.obstacles
            .iter()
            .map(|cell| format!("{},{}", cell.row, cell.col))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Whether the straight segment from the actor to `target` is unobstructed.
    ///
    /// Only cells the segment geometrically passes through can block it; the
    /// target's own obstacle never does.
    pub fn path_clear(&self, target: Cell) -> bool {
        let start = self.center();
        trace_line(start, target)
            .into_iter()
            .filter(|&cell| cell != target)
            .filter(|&cell| segment_intersects_cell(cell, start, target))
            .all(|cell| !self.is_blocked(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_cell_cannot_be_blocked() {
        let mut board = Board::default();
        assert!(!board.toggle(board.center()));
        assert!(!board.block(Cell::new(-1, 3)));
        assert_eq!(board.obstacle_count(), 0);
    }

    #[test]
    fn toggle_round_trips() {
        let mut board = Board::default();
        let cell = Cell::new(3, 4);
        assert!(board.toggle(cell));
        assert!(board.is_blocked(cell));
        assert!(!board.toggle(cell));
        assert!(!board.is_blocked(cell));
    }

    #[test]
    fn sample_layout_blocks_eight_cells() {
        let mut board = Board::default();
        board.apply_sample();
        assert_eq!(board.obstacle_count(), 8);
        assert!(board.is_blocked(Cell::new(5, 7)));
        assert!(board.is_blocked(Cell::new(8, 5)));
        board.clear();
        assert_eq!(board.fingerprint(), "");
    }

    #[test]
    fn fingerprint_is_order_independent() {
        let mut a = Board::default();
        let mut b = Board::default();
        a.block(Cell::new(1, 2));
        a.block(Cell::new(0, 9));
        b.block(Cell::new(0, 9));
        b.block(Cell::new(1, 2));
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), "0,9|1,2");
    }

    #[test]
    fn obstacle_on_the_segment_blocks_the_path() {
        let mut board = Board::default();
        let target = Cell::new(7, 10);
        assert!(board.path_clear(target));
        board.block(Cell::new(7, 8));
        assert!(!board.path_clear(target));
        assert!(board.path_clear(Cell::new(7, 8)));
    }

    #[test]
    fn corner_touch_does_not_block() {
        let mut board = Board::default();
        // The diagonal from (7,7) to (5,5) only touches the corners of (6,7) and (7,6).
        board.block(Cell::new(6, 7));
        board.block(Cell::new(7, 6));
        assert!(board.path_clear(Cell::new(5, 5)));
        board.block(Cell::new(6, 6));
        assert!(!board.path_clear(Cell::new(5, 5)));
    }
}
