//! `target_mode tile`: any cell within range, subject to restrictions.

use std::collections::{HashMap, HashSet};

use crate::config::GridConfig;
use crate::grid::{Cell, Direction, DirectionSet, Grid, translate_offsets};
use crate::rule::{AoeMode, RangeMode, Restrictions, custom_range_offsets};
use crate::state::{Board, FingerprintMemo};

use super::TargetingScenario;
use super::aoe::{AoeSpec, anchored_area};
use super::fields::FieldReader;
use super::summary::{Summary, range_label};

/// Which cells count as in range, before restrictions.
#[derive(Clone, Debug, PartialEq)]
enum TileRange {
    /// Manhattan band.
    Standard { min: f64, max: f64 },
    /// Chebyshev band.
    Square { min: f64, max: f64 },
    /// Cells on one of the lines, banded by step count.
    Lines {
        directions: DirectionSet,
        min: f64,
        max: f64,
    },
    /// Fixed absolute cells.
    Custom(HashSet<Cell>),
}

impl TileRange {
    fn contains(&self, center: Cell, cell: Cell) -> bool {
        match self {
            Self::Standard { min, max } => within(cell.manhattan(center), *min, *max),
            Self::Square { min, max } => within(cell.chebyshev(center), *min, *max),
            Self::Lines {
                directions,
                min,
                max,
            } => {
                if cell == center {
                    return *min == 0.0;
                }
                let (d_row, d_col) = cell.delta_from(center);
                let on_line = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
                let direction_allowed = Direction::toward(d_row, d_col)
                    .is_some_and(|direction| directions.contains(&direction));
                on_line
                    && direction_allowed
                    && within(cell.chebyshev(center), min.max(1.0), *max)
            }
            Self::Custom(cells) => cells.contains(&cell),
        }
    }
}

fn within(distance: i32, min: f64, max: f64) -> bool {
    let distance = f64::from(distance);
    distance >= min && distance <= max
}

#[derive(Debug)]
pub struct TileScenario {
    grid: Grid,
    summary: String,
    range: TileRange,
    restrictions: Restrictions,
    area: AoeSpec,
    /// Widen the range display to every cell some legal origin's AoE reaches.
    include_aoe: bool,
    /// covered cell -> nearest legal origin covering it
    reach: FingerprintMemo<HashMap<Cell, Cell>>,
}

impl TileScenario {
    pub fn build(fields: &mut FieldReader<'_>, grid: Grid) -> Self {
        let center = grid.center();
        let min = fields.number("min_range").unwrap_or(0.0);
        let parsed_max = fields.number("max_range");
        let max = parsed_max.unwrap_or_else(|| {
            (min + GridConfig::TILE_FALLBACK_SPAN).max(GridConfig::TILE_FALLBACK_MAX)
        });

        let range_mode = fields.keyword::<RangeMode>("range_mode").unwrap_or_default();
        let range = match range_mode {
            RangeMode::Square => TileRange::Square { min, max },
            RangeMode::Custom => {
                let cells: HashSet<Cell> =
                    translate_offsets(grid, center, &custom_range_offsets(fields.rule))
                        .into_iter()
                        .collect();
                if cells.is_empty() {
                    TileRange::Standard { min, max }
                } else {
                    TileRange::Custom(cells)
                }
            }
            mode => match mode.line_directions() {
                Some(directions) => TileRange::Lines {
                    directions,
                    min,
                    max,
                },
                None => TileRange::Standard { min, max },
            },
        };

        let restrictions = Restrictions::from_rule(fields.rule);
        let aoe_mode = fields.keyword::<AoeMode>("aoe_mode");
        let area = anchored_area(fields, aoe_mode, true);
        let include_aoe = fields.flag("range_display_include_aoe") && area.spec.is_custom();

        let mut summary = Summary::new("Tile");
        let range_text = match range {
            TileRange::Custom(_) => "custom".to_owned(),
            _ => range_label(fields.label("min_range"), fields.label("max_range"), min, max),
        };
        summary.push(format!("Range {range_text}"));
        match range_mode {
            RangeMode::Diagcross => {
                summary.push("Diagonal only");
            }
            RangeMode::Cross => {
                summary.push("Orthogonal only");
            }
            _ => {}
        }
        if let Some(label) = area.label {
            summary.push(label);
        }
        if restrictions.requires_line() {
            summary.push("Requires line of sight");
        }
        if restrictions.contains(Restrictions::MUST_MOVE) {
            summary.push("Must move");
        }

        Self {
            grid,
            summary: summary.finish(),
            range,
            restrictions,
            area: area.spec,
            include_aoe,
            reach: FingerprintMemo::new("tile_reach"),
        }
    }

    /// Whether `cell` may be chosen directly.
    pub fn is_origin(&self, board: &Board, cell: Cell) -> bool {
        let center = self.grid.center();
        if !self.grid.contains(cell) {
            return false;
        }
        if self.restrictions.contains(Restrictions::MUST_MOVE) && cell == center {
            return false;
        }
        if !self.range.contains(center, cell) {
            return false;
        }
        if self.restrictions.requires_line() && !board.path_clear(cell) {
            return false;
        }
        if self.restrictions.contains(Restrictions::FIT_2X2) && !self.footprint_fits(board, cell) {
            return false;
        }
        if self.restrictions.contains(Restrictions::MUST_BE_MOVEABLE) && board.is_blocked(cell) {
            return false;
        }
        true
    }

    /// The cell and its right, lower, and lower-right neighbours are all free.
    fn footprint_fits(&self, board: &Board, cell: Cell) -> bool {
        [(0, 0), (0, 1), (1, 0), (1, 1)]
            .into_iter()
            .map(|(d_row, d_col)| cell.offset(d_row, d_col))
            .all(|part| self.grid.contains(part) && !board.is_blocked(part))
    }

    fn area_from(&self, origin: Cell) -> Vec<Cell> {
        let (d_row, d_col) = origin.delta_from(self.grid.center());
        self.area
            .cells(self.grid, origin, Direction::toward(d_row, d_col))
    }

    fn reach_map(&self, board: &Board) -> std::rc::Rc<HashMap<Cell, Cell>> {
        self.reach.get_or_compute(board, |board| {
            let mut reach: HashMap<Cell, Cell> = HashMap::new();
            for origin in self.grid.cells().filter(|&cell| self.is_origin(board, cell)) {
                for covered in self.area_from(origin) {
                    reach
                        .entry(covered)
                        .and_modify(|best| {
                            if covered.manhattan(origin) < covered.manhattan(*best) {
                                *best = origin;
                            }
                        })
                        .or_insert(origin);
                }
            }
            reach
        })
    }
}

impl TargetingScenario for TileScenario {
    fn summary(&self) -> &str {
        &self.summary
    }

    fn is_targetable(&self, board: &Board, cell: Cell) -> bool {
        if self.is_origin(board, cell) {
            return true;
        }
        self.include_aoe && self.reach_map(board).contains_key(&cell)
    }

    fn aoe_cells(&self, board: &Board, cell: Cell) -> Vec<Cell> {
        if self.is_origin(board, cell) {
            return self.area_from(cell);
        }
        if !self.include_aoe {
            return Vec::new();
        }
        match self.reach_map(board).get(&cell) {
            Some(&origin) => self.area_from(origin),
            None => Vec::new(),
        }
    }
}
