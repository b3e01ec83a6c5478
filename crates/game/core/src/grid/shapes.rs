//! Cell-set builders: radius bands, directional lines, cones, and line unions.
//!
//! Every builder clips to the grid and returns cells in generation order without
//! duplicates.

use std::collections::HashSet;

use super::{Cell, Direction, Grid, push_unique};

/// Inclusive integer step range `[start, end]` normalized from fractional bounds.
///
/// `start = max(0, ceil(min))`, `end = max(start, floor(max))`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRange {
    pub start: i32,
    pub end: i32,
}

impl StepRange {
    pub fn new(min: f64, max: f64) -> Self {
        let start = (min.ceil() as i32).max(0);
        let end = (max.floor() as i32).max(start);
        Self { start, end }
    }

    /// Caps `end` so oversized bounds do not walk far past the grid edge.
    fn within(self, grid: Grid) -> Self {
        let limit = grid.size() * 2;
        Self {
            start: self.start.min(limit),
            end: self.end.min(limit),
        }
    }

    pub fn steps(self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

/// All cells whose Manhattan distance to `center` lies in `[min_radius, max_radius]`.
///
/// Bounds are floored and negatives clamp to 0. An inverted band (`min > max`)
/// yields nothing, so `(0, 0)` is exactly `{center}`.
pub fn cells_within_radius(grid: Grid, center: Cell, max_radius: f64, min_radius: f64) -> Vec<Cell> {
    let max = floor_non_negative(max_radius);
    let min = floor_non_negative(min_radius);
    if min > max {
        return Vec::new();
    }

    grid.cells()
        .filter(|cell| {
            let distance = cell.manhattan(center);
            distance >= min && distance <= max
        })
        .collect()
}

fn floor_non_negative(value: f64) -> i32 {
    if value.is_finite() {
        (value.floor() as i32).max(0)
    } else if value == f64::INFINITY {
        i32::MAX
    } else {
        0
    }
}

/// Cells `origin + direction * step` for each step in `[min, max]`.
pub fn directional_line(
    grid: Grid,
    origin: Cell,
    direction: Direction,
    min: f64,
    max: f64,
) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut seen = HashSet::new();
    for step in StepRange::new(min, max).within(grid).steps() {
        let cell = origin.step(direction, step);
        if grid.contains(cell) {
            push_unique(&mut cells, &mut seen, cell);
        }
    }
    cells
}

/// A cone along `direction` whose half-width at step `s` is `max(0, s - 1)`.
pub fn directional_cone(
    grid: Grid,
    origin: Cell,
    direction: Direction,
    min: f64,
    max: f64,
) -> Vec<Cell> {
    let lateral = direction.rotate90();
    let mut cells = Vec::new();
    let mut seen = HashSet::new();
    for step in StepRange::new(min, max).within(grid).steps() {
        let spine = origin.step(direction, step);
        let half_width = (step - 1).max(0);
        for offset in -half_width..=half_width {
            let cell = spine.step(lateral, offset);
            if grid.contains(cell) {
                push_unique(&mut cells, &mut seen, cell);
            }
        }
    }
    cells
}

/// The line through `through` perpendicular to `facing`, covering lateral offsets
/// `[min(min, max), max(min, max)]`.
///
/// Without a facing (the actor's own cell) only `through` is returned.
pub fn perpendicular_line(
    grid: Grid,
    through: Cell,
    facing: Option<Direction>,
    min: f64,
    max: f64,
) -> Vec<Cell> {
    let Some(facing) = facing else {
        return vec![through];
    };
    let lateral = facing.rotate90();
    let start = (min.min(max).ceil() as i32).max(-grid.size() * 2);
    let end = (min.max(max).floor() as i32).min(grid.size() * 2);

    let mut cells = Vec::new();
    let mut seen = HashSet::new();
    for offset in start..=end {
        let cell = through.step(lateral, offset);
        if grid.contains(cell) {
            push_unique(&mut cells, &mut seen, cell);
        }
    }
    cells
}

/// Union of [`directional_line`] over each direction, de-duplicated.
pub fn line_union(
    grid: Grid,
    origin: Cell,
    directions: &[Direction],
    min: f64,
    max: f64,
) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut seen = HashSet::new();
    for &direction in directions {
        for cell in directional_line(grid, origin, direction, min, max) {
            push_unique(&mut cells, &mut seen, cell);
        }
    }
    cells
}
