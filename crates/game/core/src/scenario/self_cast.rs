//! `target_mode none`: the actor targets itself.

use crate::grid::{Cell, Grid};
use crate::rule::AoeMode;
use crate::state::Board;

use super::TargetingScenario;
use super::aoe::{AoeSpec, anchored_area};
use super::fields::FieldReader;
use super::summary::Summary;

#[derive(Clone, Debug)]
pub struct SelfCastScenario {
    grid: Grid,
    summary: String,
    area: AoeSpec,
    /// The area around the actor is non-empty.
    has_area: bool,
}

impl SelfCastScenario {
    pub fn build(fields: &mut FieldReader<'_>, grid: Grid) -> Self {
        let mode = fields.keyword::<AoeMode>("aoe_mode");
        let area = anchored_area(fields, mode, false);

        let mut summary = Summary::new("Self");
        if let Some(label) = area.label {
            summary.push(label);
        }

        let has_area = !area.spec.cells(grid, grid.center(), None).is_empty();
        Self {
            grid,
            summary: summary.finish(),
            area: area.spec,
            has_area,
        }
    }
}

impl TargetingScenario for SelfCastScenario {
    fn summary(&self) -> &str {
        &self.summary
    }

    fn is_targetable(&self, _board: &Board, cell: Cell) -> bool {
        cell == self.grid.center()
    }

    fn aoe_cells(&self, _board: &Board, cell: Cell) -> Vec<Cell> {
        if cell != self.grid.center() {
            return Vec::new();
        }
        self.area.cells(self.grid, cell, None)
    }

    fn always_show_aoe(&self) -> bool {
        self.has_area
    }
}
