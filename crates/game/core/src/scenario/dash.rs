//! Dash attacks: the actor moves along a direction and strikes where it stops.

use std::collections::HashSet;
use std::rc::Rc;

use crate::grid::{Cell, Direction, DirectionSet, Grid, push_unique};
use crate::rule::{AoeMode, TargetMode};
use crate::state::{Board, FingerprintMemo};

use super::TargetingScenario;
use super::aoe::{AoeShape, AoeSpec, Bounds, banded_shape};
use super::direction::DirectionInputs;
use super::summary::{Summary, format_number, step_label};

/// One direction's movement and the cells it hits.
#[derive(Clone, Debug, PartialEq)]
pub struct DashLane {
    pub direction: Direction,
    /// Cells stepped through, nearest first.
    pub path: Vec<Cell>,
    /// Furthest reached cell; the actor's cell when blocked on the first step.
    pub stop: Cell,
    /// Path cells followed by the AoE around `stop`.
    pub hits: Vec<Cell>,
}

#[derive(Debug)]
pub struct DashScenario {
    grid: Grid,
    summary: String,
    directions: DirectionSet,
    max_steps: i32,
    stop_area: AoeSpec,
    lanes: FingerprintMemo<Vec<DashLane>>,
}

impl DashScenario {
    /// Whether a directional rule should be simulated as a dash.
    pub fn applies(mode: TargetMode, inputs: &DirectionInputs, dash_attack: bool) -> bool {
        mode == TargetMode::Direction
            && inputs.has_range
            && dash_attack
            && inputs.aoe_mode != AoeMode::All
    }

    pub fn build(inputs: &DirectionInputs, grid: Grid) -> Self {
        let selection = inputs.selection;
        let reach = inputs.aoe_bounds(1.0, selection.max);

        let (shape, label) = if inputs.splash > 0.0 {
            (
                AoeShape::Radius(Bounds::new(0.0, inputs.splash)),
                Some(format!("Splash {}", format_number(inputs.splash))),
            )
        } else {
            match inputs.effective_mode() {
                AoeMode::Custom => (inputs.custom_shape(), Some("Splash custom".to_owned())),
                AoeMode::Cone => (AoeShape::Cone(reach), Some(line_length(reach))),
                AoeMode::Line | AoeMode::All => (AoeShape::Line(reach), Some(line_length(reach))),
                banded => {
                    let bounds = inputs.aoe_bounds(0.0, 0.0);
                    let shape = banded_shape(Some(banded), bounds);
                    let label = (shape != AoeShape::Empty)
                        .then(|| format!("Splash {}", inputs.splash_label(bounds)));
                    (shape, label)
                }
            }
        };

        let mut summary = Summary::new("Dash");
        summary.push(format!("Range {}", step_label(selection.min, selection.max)));
        if let Some(label) = label {
            summary.push(label);
        }
        summary.push("Stops at obstacles");

        Self {
            grid,
            summary: summary.finish(),
            directions: TargetMode::Direction.directions(),
            max_steps: (selection.max.floor() as i32).max(0),
            stop_area: AoeSpec {
                shape,
                excludes_self: inputs.excludes_self,
            },
            lanes: FingerprintMemo::new("dash_lanes"),
        }
    }

    /// Per-direction dash results for the board's current obstacles.
    pub fn lanes(&self, board: &Board) -> Rc<Vec<DashLane>> {
        self.lanes.get_or_compute(board, |board| {
            self.directions
                .iter()
                .map(|&direction| self.dash(board, direction))
                .collect()
        })
    }

    fn dash(&self, board: &Board, direction: Direction) -> DashLane {
        let mut path = Vec::new();
        let mut stop = self.grid.center();
        for _ in 0..self.max_steps {
            let next = stop.step(direction, 1);
            if !self.grid.contains(next) || board.is_blocked(next) {
                break;
            }
            path.push(next);
            stop = next;
        }

        let mut hits = Vec::new();
        let mut seen = HashSet::new();
        let area = self.stop_area.cells(self.grid, stop, Some(direction));
        for cell in path.iter().copied().chain(area) {
            push_unique(&mut hits, &mut seen, cell);
        }

        DashLane {
            direction,
            path,
            stop,
            hits,
        }
    }

    /// The lane a hovered cell belongs to: the first lane for the actor's own
    /// cell, otherwise the covering lane best aligned with the cell.
    fn lane_for<'a>(&self, lanes: &'a [DashLane], cell: Cell) -> Option<&'a DashLane> {
        let center = self.grid.center();
        let mut covering = lanes.iter().filter(|lane| lane.hits.contains(&cell));
        if cell == center {
            return covering.next();
        }

        let (d_row, d_col) = cell.delta_from(center);
        let mut best: Option<(f64, &DashLane)> = None;
        for lane in covering {
            let score = lane.direction.alignment(d_row, d_col);
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, lane));
            }
        }
        best.map(|(_, lane)| lane)
    }
}

fn line_length(bounds: Bounds) -> String {
    format!(
        "Line length {}",
        step_label(bounds.min.max(0.0), bounds.max.max(0.0))
    )
}

impl TargetingScenario for DashScenario {
    fn summary(&self) -> &str {
        &self.summary
    }

    fn is_targetable(&self, board: &Board, cell: Cell) -> bool {
        self.lanes(board).iter().any(|lane| lane.hits.contains(&cell))
    }

    fn aoe_cells(&self, board: &Board, cell: Cell) -> Vec<Cell> {
        let lanes = self.lanes(board);
        self.lane_for(&lanes, cell)
            .map(|lane| lane.hits.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ParsedRule;
    use crate::scenario::fields::FieldReader;
    use crate::state::VariableRegistry;

    fn build(text: &str) -> DashScenario {
        let rule = ParsedRule::parse(text);
        let mut variables = VariableRegistry::new();
        let mut fields = FieldReader::new(&rule, &mut variables);
        let inputs = DirectionInputs::read(&mut fields);
        assert!(DashScenario::applies(TargetMode::Direction, &inputs, true));
        DashScenario::build(&inputs, Grid::default())
    }

    #[test]
    fn dash_needs_a_range_and_the_option() {
        let rule = ParsedRule::parse("target_mode direction\naoe_mode all\nmax_range 2");
        let mut variables = VariableRegistry::new();
        let mut fields = FieldReader::new(&rule, &mut variables);
        let inputs = DirectionInputs::read(&mut fields);
        assert!(!DashScenario::applies(TargetMode::Direction, &inputs, true));

        let rule = ParsedRule::parse("target_mode direction");
        let mut fields = FieldReader::new(&rule, &mut variables);
        let inputs = DirectionInputs::read(&mut fields);
        assert!(!DashScenario::applies(TargetMode::Direction, &inputs, true));
        assert!(!DashScenario::applies(TargetMode::Direction8, &inputs, true));
    }

    #[test]
    fn open_board_lanes_run_full_length() {
        let scenario = build("target_mode direction\nmin_range 1\nmax_range 3");
        let board = Board::default();
        let lanes = scenario.lanes(&board);
        let east = &lanes[3];
        assert_eq!(east.direction, Direction::EAST);
        assert_eq!(east.stop, Cell::new(7, 10));
        assert_eq!(east.hits.len(), 6);
        assert!(east.hits.contains(&Cell::new(7, 13)));
        assert_eq!(
            scenario.summary(),
            "Mode: Dash · Range 1–3 · Line length 1–3 · Stops at obstacles"
        );
    }

    #[test]
    fn obstacles_stop_the_path_not_the_area() {
        let scenario = build("target_mode direction\nmin_range 1\nmax_range 3");
        let mut board = Board::default();
        board.block(Cell::new(7, 9));
        let lanes = scenario.lanes(&board);
        let east = &lanes[3];
        assert_eq!(east.path, vec![Cell::new(7, 8)]);
        assert_eq!(east.stop, Cell::new(7, 8));
        assert!(east.hits.contains(&Cell::new(7, 9)));
        assert!(!scenario.is_targetable(&board, Cell::new(7, 12)));
        assert!(scenario.is_targetable(&board, Cell::new(7, 11)));
    }

    #[test]
    fn center_resolves_to_the_first_lane() {
        let scenario = build("target_mode direction\nmax_range 1\naoe_mode standard\nmin_aoe 0\nmax_aoe 1");
        let board = Board::default();
        let center = board.center();
        assert!(scenario.is_targetable(&board, center));
        let hits = scenario.aoe_cells(&board, center);
        assert!(hits.contains(&Cell::new(6, 7)));
        assert!(!hits.contains(&Cell::new(8, 7)));
    }

    #[test]
    fn lanes_follow_obstacle_changes() {
        let scenario = build("target_mode direction\nmin_range 1\nmax_range 4\naoe_radius 1");
        let mut board = Board::default();
        let before = scenario.lanes(&board);

        board.toggle(Cell::new(5, 7));
        let blocked = scenario.lanes(&board);
        assert_eq!(blocked[0].stop, Cell::new(6, 7));

        board.toggle(Cell::new(5, 7));
        assert_eq!(*scenario.lanes(&board), *before);
    }

    #[test]
    fn shared_cell_goes_to_the_best_aligned_lane() {
        let scenario = build("target_mode direction\nmin_range 1\nmax_range 1\naoe_radius 2");
        let board = Board::default();
        let lanes = scenario.lanes(&board);
        let shared = Cell::new(6, 9);
        assert!(lanes[0].hits.contains(&shared));
        assert!(lanes[3].hits.contains(&shared));

        // East points at (-1, 2) more directly than north does.
        assert_eq!(scenario.aoe_cells(&board, shared), lanes[3].hits);
    }
}
