//! `target_mode direction` and `direction8`: selection along fixed directions.
//!
//! Each direction is a lane: the selection line the actor can aim along plus,
//! for actor-cast patterns, the cells that pattern covers. A lane is usable only
//! while some cell of its selection line has a clear path from the actor.

use crate::grid::{Cell, Direction, Grid, Offset, directional_line};
use crate::rule::{AoeMode, TargetMode, custom_aoe_offsets};
use crate::state::Board;

use super::TargetingScenario;
use super::aoe::{AoeShape, AoeSpec, Bounds, banded_shape, resolve_bounds};
use super::fields::FieldReader;
use super::summary::{Summary, format_number, range_label, step_label};

// ============================================================================
// Inputs
// ============================================================================

/// Fields shared by the plain directional and dash builders.
#[derive(Clone, Debug)]
pub struct DirectionInputs {
    /// Selection steps, at least `[1, 1]`.
    pub selection: Bounds,
    /// Whether `min_range` or `max_range` evaluated.
    pub has_range: bool,
    pub aoe_mode: AoeMode,
    aoe_min: Option<f64>,
    aoe_max: Option<f64>,
    aoe_min_label: Option<String>,
    aoe_max_label: Option<String>,
    /// `aoe_radius`, else `max_aoe_radius`, else `max_area`; never negative.
    pub splash: f64,
    pub offsets: Vec<Offset>,
    pub orient: bool,
    pub excludes_self: bool,
}

impl DirectionInputs {
    pub fn read(fields: &mut FieldReader<'_>) -> Self {
        let min_range = fields.number("min_range");
        let max_range = fields.number("max_range");
        let requested = resolve_bounds(min_range, max_range, 1.0, 1.0);
        let selection_min = requested.min.max(1.0);
        let selection = Bounds::new(selection_min, requested.max.max(selection_min));

        let aoe_mode = fields
            .keyword::<AoeMode>("aoe_mode")
            .unwrap_or(AoeMode::Line);
        let splash = fields
            .number("aoe_radius")
            .or_else(|| fields.number("max_aoe_radius"))
            .or_else(|| fields.number("max_area"))
            .unwrap_or(0.0)
            .max(0.0);
        let offsets = match aoe_mode {
            AoeMode::Custom => custom_aoe_offsets(fields.rule),
            _ => Vec::new(),
        };

        Self {
            selection,
            has_range: min_range.is_some() || max_range.is_some(),
            aoe_mode,
            aoe_min: fields.number("min_aoe"),
            aoe_max: fields.number("max_aoe"),
            aoe_min_label: fields.label("min_aoe").map(str::to_owned),
            aoe_max_label: fields.label("max_aoe").map(str::to_owned),
            splash,
            offsets,
            orient: !fields.flag("dont_orient_aoe"),
            excludes_self: fields.flag("aoe_excludes_self"),
        }
    }

    /// `min_aoe`/`max_aoe` resolved against the given defaults.
    pub fn aoe_bounds(&self, default_min: f64, default_max: f64) -> Bounds {
        resolve_bounds(self.aoe_min, self.aoe_max, default_min, default_max)
    }

    pub fn splash_label(&self, bounds: Bounds) -> String {
        range_label(
            self.aoe_min_label.as_deref(),
            self.aoe_max_label.as_deref(),
            bounds.min,
            bounds.max,
        )
    }

    /// The AoE mode actually simulated: `custom` without any offsets acts as `line`.
    pub fn effective_mode(&self) -> AoeMode {
        match self.aoe_mode {
            AoeMode::Custom if self.offsets.is_empty() => AoeMode::Line,
            mode => mode,
        }
    }

    pub fn custom_shape(&self) -> AoeShape {
        AoeShape::Custom {
            offsets: self.offsets.clone(),
            orient: self.orient,
        }
    }
}

// ============================================================================
// Scenario
// ============================================================================

#[derive(Clone, Debug)]
struct Lane {
    direction: Direction,
    selection: Vec<Cell>,
    /// Cells covered by an actor-cast pattern; empty for the other areas.
    pattern: Vec<Cell>,
}

impl Lane {
    fn reachable(&self, board: &Board) -> bool {
        self.selection.iter().any(|&cell| board.path_clear(cell))
    }
}

#[derive(Clone, Debug)]
enum LaneArea {
    /// A radius around every reachable selection cell.
    Splash { radius: f64 },
    /// A shape placed on the chosen selection cell.
    Anchored(AoeSpec),
    /// Per-lane patterns cast from the actor.
    Pattern,
}

/// How a hovered cell was reached.
enum Hit<'a> {
    Splash(Cell),
    Selection(&'a Lane, Cell),
    Pattern(&'a Lane),
}

#[derive(Clone, Debug)]
pub struct DirectionScenario {
    grid: Grid,
    summary: String,
    lanes: Vec<Lane>,
    area: LaneArea,
    excludes_self: bool,
    always_show: bool,
}

impl DirectionScenario {
    pub fn build(inputs: &DirectionInputs, mode: TargetMode, grid: Grid) -> Self {
        let center = grid.center();
        let aoe_mode = inputs.effective_mode();
        let mut selection = inputs.selection;
        let pattern_bounds = inputs.aoe_bounds(1.0, selection.max);

        let mut summary = Summary::new(match mode {
            TargetMode::Direction8 => "Direction (8-way)",
            _ => "Direction",
        });

        let (area, pattern) = if inputs.splash > 0.0 {
            (LaneArea::Splash { radius: inputs.splash }, None)
        } else {
            match aoe_mode {
                AoeMode::Line => {
                    if !inputs.has_range {
                        let min = pattern_bounds.min.max(1.0);
                        selection = Bounds::new(min, pattern_bounds.max.max(selection.min).max(min));
                    }
                    (LaneArea::Pattern, Some(AoeShape::Line(pattern_bounds)))
                }
                AoeMode::Cone => (LaneArea::Pattern, Some(AoeShape::Cone(pattern_bounds))),
                AoeMode::Custom => (LaneArea::Pattern, Some(inputs.custom_shape())),
                AoeMode::All => (LaneArea::Pattern, Some(AoeShape::All)),
                banded => {
                    let bounds = inputs.aoe_bounds(0.0, 0.0);
                    let spec = AoeSpec {
                        shape: banded_shape(Some(banded), bounds),
                        excludes_self: inputs.excludes_self,
                    };
                    (LaneArea::Anchored(spec), None)
                }
            }
        };

        summary.push(format!("Range {}", step_label(selection.min, selection.max)));
        match (&area, &pattern) {
            (LaneArea::Splash { radius }, _) => {
                summary.push(format!("Splash {}", format_number(*radius)));
            }
            (_, Some(AoeShape::Line(bounds) | AoeShape::Cone(bounds))) => {
                summary.push(format!(
                    "Line length {}",
                    step_label(bounds.min.max(0.0), bounds.max.max(0.0))
                ));
            }
            (_, Some(AoeShape::Custom { .. })) => {
                summary.push("Splash custom");
            }
            (_, Some(AoeShape::All)) => {
                summary.push("Splash all");
            }
            (LaneArea::Anchored(spec), None) if spec.shape != AoeShape::Empty => {
                summary.push(format!("Splash {}", inputs.splash_label(inputs.aoe_bounds(0.0, 0.0))));
            }
            _ => {}
        }
        summary.push("Requires line of sight");

        let pattern = pattern.map(|shape| AoeSpec {
            shape,
            excludes_self: inputs.excludes_self,
        });
        let lanes = mode
            .directions()
            .into_iter()
            .map(|direction| Lane {
                direction,
                selection: directional_line(grid, center, direction, selection.min, selection.max),
                pattern: pattern
                    .as_ref()
                    .map(|spec| spec.cells(grid, center, Some(direction)))
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            grid,
            summary: summary.finish(),
            lanes,
            area,
            excludes_self: inputs.excludes_self,
            always_show: aoe_mode == AoeMode::All,
        }
    }

    fn hit(&self, board: &Board, cell: Cell) -> Option<Hit<'_>> {
        if !self.grid.contains(cell) {
            return None;
        }
        match self.area {
            LaneArea::Splash { radius } => self.splash_source(board, cell, radius).map(Hit::Splash),
            LaneArea::Anchored(_) => self
                .lanes
                .iter()
                .find(|lane| lane.selection.contains(&cell))
                .filter(|_| board.path_clear(cell))
                .map(|lane| Hit::Selection(lane, cell)),
            LaneArea::Pattern => self.best_pattern(board, cell).map(Hit::Pattern),
        }
    }

    /// First reachable selection cell whose splash covers `cell`, in direction
    /// order and then step order.
    fn splash_source(&self, board: &Board, cell: Cell, radius: f64) -> Option<Cell> {
        if self.excludes_self && cell == self.grid.center() {
            return None;
        }
        self.lanes
            .iter()
            .flat_map(|lane| &lane.selection)
            .copied()
            .filter(|source| f64::from(cell.manhattan(*source)) <= radius.floor())
            .find(|&source| board.path_clear(source))
    }

    /// Reachable lane covering `cell` that points most directly at it.
    fn best_pattern(&self, board: &Board, cell: Cell) -> Option<&Lane> {
        let (d_row, d_col) = cell.delta_from(self.grid.center());
        let mut best: Option<(f64, &Lane)> = None;
        for lane in &self.lanes {
            if !lane.pattern.contains(&cell) {
                continue;
            }
            let score = lane.direction.alignment(d_row, d_col);
            if best.is_some_and(|(top, _)| top >= score) {
                continue;
            }
            if lane.reachable(board) {
                best = Some((score, lane));
            }
        }
        best.map(|(_, lane)| lane)
    }
}

impl TargetingScenario for DirectionScenario {
    fn summary(&self) -> &str {
        &self.summary
    }

    fn is_targetable(&self, board: &Board, cell: Cell) -> bool {
        self.hit(board, cell).is_some()
    }

    fn aoe_cells(&self, board: &Board, cell: Cell) -> Vec<Cell> {
        match (self.hit(board, cell), &self.area) {
            (Some(Hit::Splash(source)), LaneArea::Splash { radius }) => AoeSpec {
                shape: AoeShape::Radius(Bounds::new(0.0, *radius)),
                excludes_self: self.excludes_self,
            }
            .cells(self.grid, source, None),
            (Some(Hit::Selection(lane, anchor)), LaneArea::Anchored(spec)) => {
                spec.cells(self.grid, anchor, Some(lane.direction))
            }
            (Some(Hit::Pattern(lane)), _) => lane.pattern.clone(),
            _ => Vec::new(),
        }
    }

    fn always_show_aoe(&self) -> bool {
        self.always_show
    }
}
