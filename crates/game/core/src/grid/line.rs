//! Line rasterization and exact segment/cell intersection.
//!
//! [`trace_line`] produces candidate cells cheaply; [`segment_intersects_cell`]
//! decides whether the continuous segment between two cell centers really passes
//! through a cell's square. Line-of-sight combines both so a path that only grazes
//! a corner point is not blocked by it.

use std::collections::HashSet;

use super::{Cell, push_unique};

/// Supercover line from `start` to `end`, excluding `start` and including `end`.
///
/// Bresenham stepping that also emits both orthogonal neighbours on every diagonal
/// step. The cell set does not depend on which endpoint is traced from: the line is
/// always rasterized from the smaller endpoint and reversed when needed.
pub fn trace_line(start: Cell, end: Cell) -> Vec<Cell> {
    if start == end {
        return Vec::new();
    }

    let mut cells = if start <= end {
        supercover(start, end)
    } else {
        let mut reversed = supercover(end, start);
        reversed.reverse();
        reversed
    };
    cells.retain(|&cell| cell != start);
    cells
}

/// Both endpoints included, ordered from `from` to `to`.
fn supercover(from: Cell, to: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut seen = HashSet::new();
    push_unique(&mut cells, &mut seen, from);

    let (mut x, mut y) = (from.col, from.row);
    let (x1, y1) = (to.col, to.row);
    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    while x != x1 || y != y1 {
        let e2 = err * 2;
        let step_x = e2 > -dy;
        let step_y = e2 < dx;
        if step_x {
            err -= dy;
            x += sx;
        }
        if step_y {
            err += dx;
            y += sy;
        }
        push_unique(&mut cells, &mut seen, Cell::new(y, x));

        if step_x && step_y {
            push_unique(&mut cells, &mut seen, Cell::new(y - sy, x));
            push_unique(&mut cells, &mut seen, Cell::new(y, x - sx));
        }
    }

    cells
}

/// Whether the segment between the centers of `start` and `end` passes through the
/// unit square of `cell` (±0.5 around its center).
///
/// Touching a single corner point does not count. A degenerate segment intersects
/// only its own cell.
pub fn segment_intersects_cell(cell: Cell, start: Cell, end: Cell) -> bool {
    if start == end {
        return cell == start;
    }

    const HALF: f64 = 0.5;
    let x_min = cell.col as f64 - HALF;
    let x_max = cell.col as f64 + HALF;
    let y_min = cell.row as f64 - HALF;
    let y_max = cell.row as f64 + HALF;

    let x0 = start.col as f64;
    let y0 = start.row as f64;
    let dx = end.col as f64 - x0;
    let dy = end.row as f64 - y0;

    // Liang-Barsky clipping: narrow [t0, t1] against each slab.
    let checks = [
        (-dx, x0 - x_min),
        (dx, x_max - x0),
        (-dy, y0 - y_min),
        (dy, y_max - y0),
    ];

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return false;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return false;
            }
            t1 = t1.min(t);
        }
    }

    t0 < t1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: Vec<Cell>) -> HashSet<Cell> {
        cells.into_iter().collect()
    }

    #[test]
    fn straight_line_excludes_start_and_includes_end() {
        let path = trace_line(Cell::new(7, 7), Cell::new(7, 10));
        assert_eq!(
            path,
            vec![Cell::new(7, 8), Cell::new(7, 9), Cell::new(7, 10)]
        );
        assert!(trace_line(Cell::new(3, 3), Cell::new(3, 3)).is_empty());
    }

    #[test]
    fn diagonal_steps_emit_corner_cells() {
        let path = set(trace_line(Cell::new(0, 0), Cell::new(1, 1)));
        assert_eq!(
            path,
            set(vec![Cell::new(1, 1), Cell::new(0, 1), Cell::new(1, 0)])
        );
    }

    #[test]
    fn tracing_back_covers_the_same_interior() {
        let center = Cell::new(7, 7);
        for target in [Cell::new(5, 8), Cell::new(9, 12), Cell::new(0, 3), Cell::new(14, 14)] {
            let mut forward = set(trace_line(center, target));
            let mut backward = set(trace_line(target, center));
            forward.remove(&target);
            backward.remove(&center);
            assert_eq!(forward, backward, "asymmetric trace to {target}");
        }
    }

    #[test]
    fn segment_through_corner_point_misses_neighbours() {
        let start = Cell::new(0, 0);
        let end = Cell::new(2, 2);
        assert!(segment_intersects_cell(Cell::new(1, 1), start, end));
        assert!(!segment_intersects_cell(Cell::new(0, 1), start, end));
        assert!(!segment_intersects_cell(Cell::new(1, 0), start, end));
    }

    #[test]
    fn shallow_segment_crosses_row_boundary() {
        // (0,0) -> (1,2): crosses into row 1 exactly at column 1.
        let start = Cell::new(0, 0);
        let end = Cell::new(1, 2);
        assert!(segment_intersects_cell(Cell::new(0, 1), start, end));
        assert!(segment_intersects_cell(Cell::new(1, 1), start, end));
        assert!(!segment_intersects_cell(Cell::new(1, 0), start, end));
        assert!(!segment_intersects_cell(Cell::new(0, 2), start, end));
    }

    #[test]
    fn degenerate_segment_only_hits_itself() {
        let cell = Cell::new(4, 4);
        assert!(segment_intersects_cell(cell, cell, cell));
        assert!(!segment_intersects_cell(Cell::new(4, 5), cell, cell));
    }

    #[test]
    fn trace_covers_every_intersected_cell() {
        let start = Cell::new(7, 7);
        for target in [Cell::new(2, 9), Cell::new(13, 4), Cell::new(7, 0), Cell::new(10, 11)] {
            let traced = set(trace_line(start, target));
            for row in 0..15 {
                for col in 0..15 {
                    let cell = Cell::new(row, col);
                    if cell != start && segment_intersects_cell(cell, start, target) {
                        assert!(traced.contains(&cell), "{cell} missing from trace to {target}");
                    }
                }
            }
        }
    }
}
