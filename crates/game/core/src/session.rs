//! The interactive visualizer session.
//!
//! [`Visualizer`] owns everything that outlives a single render: the rule text,
//! the obstacle board, the slider values, and the hovered cell. Front ends feed
//! it input events and draw [`Visualizer::frame`].

use bitflags::bitflags;

use crate::error::{RenderError, Warning};
use crate::grid::{Cell, Grid};
use crate::scenario::{self, RenderOptions, Rendered, Scenario, TargetingScenario};
use crate::state::{Board, VariableRegistry};

const NO_DATA_SUMMARY: &str = "No targeting data";
const FAILED_SUMMARY: &str = "Summary unavailable";

bitflags! {
    /// Display state of one grid cell.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellFlags: u8 {
        /// The actor's cell.
        const ORIGIN = 1 << 0;
        const BLOCKED = 1 << 1;
        /// Targetable under the current rule.
        const IN_RANGE = 1 << 2;
        /// The hovered target.
        const TARGET = 1 << 3;
        const AOE = 1 << 4;
    }
}

/// Per-cell flags for one frame, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    pub size: i32,
    pub rows: Vec<Vec<CellFlags>>,
}

impl GridSnapshot {
    fn empty(grid: Grid) -> Self {
        let size = grid.size();
        Self {
            size,
            rows: vec![vec![CellFlags::empty(); size as usize]; size as usize],
        }
    }

    pub fn flags(&self, cell: Cell) -> CellFlags {
        usize::try_from(cell.row)
            .ok()
            .zip(usize::try_from(cell.col).ok())
            .and_then(|(row, col)| self.rows.get(row)?.get(col).copied())
            .unwrap_or_default()
    }

    fn mark(&mut self, cell: Cell, flags: CellFlags) {
        let (Ok(row), Ok(col)) = (usize::try_from(cell.row), usize::try_from(cell.col)) else {
            return;
        };
        if let Some(slot) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            slot.insert(flags);
        }
    }

    /// Cells carrying every flag in `flags`, row-major.
    pub fn cells_with(&self, flags: CellFlags) -> Vec<Cell> {
        Grid::new(self.size)
            .cells()
            .filter(|&cell| self.flags(cell).contains(flags))
            .collect()
    }
}

/// What hovering a targetable cell would show.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoverPreview {
    pub target: Cell,
    /// Affected cells; the target alone when the rule has no area.
    pub aoe: Vec<Cell>,
}

/// One line of the raw rule text, flagged when a fatal error points at it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedLine {
    pub index: usize,
    pub text: String,
    pub is_error: bool,
}

/// Outcome of the latest render.
#[derive(Debug, Default)]
pub enum RenderState {
    /// Blank rule text.
    #[default]
    Empty,
    Failed(RenderError),
    Ready(Rendered),
}

/// Serializable summary of the session for non-interactive output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderReport {
    pub summary: String,
    pub error: Option<String>,
    pub error_line: Option<usize>,
    pub warnings: Vec<Warning>,
    pub variables: Vec<(String, i32)>,
    pub grid: GridSnapshot,
}

// ============================================================================
// Visualizer
// ============================================================================

#[derive(Debug)]
pub struct Visualizer {
    board: Board,
    variables: VariableRegistry,
    options: RenderOptions,
    text: String,
    state: RenderState,
    hover: Option<Cell>,
}

impl Visualizer {
    pub fn new(grid: Grid) -> Self {
        Self::with_options(grid, RenderOptions::default())
    }

    pub fn with_options(grid: Grid, options: RenderOptions) -> Self {
        Self {
            board: Board::new(grid),
            variables: VariableRegistry::new(),
            options,
            text: String::new(),
            state: RenderState::Empty,
            hover: None,
        }
    }

    pub fn grid(&self) -> Grid {
        self.board.grid()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        match &self.state {
            RenderState::Ready(rendered) => Some(&rendered.scenario),
            _ => None,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        match &self.state {
            RenderState::Ready(rendered) => &rendered.warnings,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&RenderError> {
        match &self.state {
            RenderState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn summary(&self) -> &str {
        match &self.state {
            RenderState::Empty => NO_DATA_SUMMARY,
            RenderState::Failed(_) => FAILED_SUMMARY,
            RenderState::Ready(rendered) => rendered.scenario.summary(),
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Replaces the rule text and rebuilds the scenario.
    pub fn render(&mut self, text: &str) -> &RenderState {
        self.text = text.replace("\r\n", "\n");
        self.rebuild();
        &self.state
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
        self.rebuild();
    }

    /// Sets a slider value (clamped) and rebuilds. Returns the stored value, or
    /// `None` for the reserved `size` variable and blank names.
    pub fn set_variable(&mut self, name: &str, value: i32) -> Option<i32> {
        let stored = self.variables.set(name, value)?;
        tracing::info!(variable = name, value = stored, "variable changed");
        self.rebuild();
        Some(stored)
    }

    pub fn variable(&self, name: &str) -> Option<i32> {
        self.variables.value(name)
    }

    /// Required variables except `size`, with their current values.
    pub fn adjustable_variables(&self) -> Vec<(String, i32)> {
        self.variables.adjustable()
    }

    /// Flips an obstacle. Returns whether the cell is now blocked.
    pub fn toggle_obstacle(&mut self, cell: Cell) -> bool {
        let blocked = self.board.toggle(cell);
        self.hover = None;
        tracing::info!(%cell, blocked, "obstacle toggled");
        blocked
    }

    pub fn clear_obstacles(&mut self) {
        self.board.clear();
        self.hover = None;
        tracing::info!("obstacles cleared");
    }

    pub fn apply_sample_obstacles(&mut self) {
        self.board.apply_sample();
        self.hover = None;
        tracing::info!(obstacles = self.board.obstacle_count(), "sample obstacles applied");
    }

    /// Moves the hover to `cell` and returns its preview, if it is a target.
    pub fn hover(&mut self, cell: Cell) -> Option<HoverPreview> {
        self.hover = Some(cell);
        self.preview(cell)
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    pub fn hovered(&self) -> Option<Cell> {
        self.hover
    }

    fn rebuild(&mut self) {
        self.hover = None;
        let outcome = scenario::render(
            &self.text,
            self.board.grid(),
            &mut self.variables,
            &self.options,
        );
        self.state = match outcome {
            Ok(None) => RenderState::Empty,
            Ok(Some(rendered)) => RenderState::Ready(rendered),
            Err(err) => {
                tracing::warn!(error = %err, line = ?err.line(), "render failed");
                RenderState::Failed(err)
            }
        };
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Preview for `cell` without moving the hover.
    pub fn preview(&self, cell: Cell) -> Option<HoverPreview> {
        let scenario = self.scenario()?;
        if !scenario.is_targetable(&self.board, cell) {
            return None;
        }
        let mut aoe = scenario.aoe_cells(&self.board, cell);
        if aoe.is_empty() {
            aoe.push(cell);
        }
        Some(HoverPreview { target: cell, aoe })
    }

    pub fn frame(&self) -> GridSnapshot {
        let grid = self.board.grid();
        let center = grid.center();
        let mut snapshot = GridSnapshot::empty(grid);

        snapshot.mark(center, CellFlags::ORIGIN);
        for cell in self.board.obstacles() {
            snapshot.mark(cell, CellFlags::BLOCKED);
        }

        let Some(scenario) = self.scenario() else {
            return snapshot;
        };
        for cell in grid.cells() {
            if scenario.is_targetable(&self.board, cell) {
                snapshot.mark(cell, CellFlags::IN_RANGE);
            }
        }
        if scenario.always_show_aoe() {
            for cell in scenario.aoe_cells(&self.board, center) {
                snapshot.mark(cell, CellFlags::AOE);
            }
        }
        if let Some(preview) = self.hover.and_then(|cell| self.preview(cell)) {
            snapshot.mark(preview.target, CellFlags::TARGET);
            for cell in preview.aoe {
                snapshot.mark(cell, CellFlags::AOE);
            }
        }
        snapshot
    }

    /// Raw rule lines with the fatal error line flagged.
    pub fn annotated_lines(&self) -> Vec<AnnotatedLine> {
        if self.text.is_empty() {
            return Vec::new();
        }
        let error_line = self.error().and_then(RenderError::line);
        self.text
            .split('\n')
            .enumerate()
            .map(|(index, text)| AnnotatedLine {
                index,
                text: text.to_owned(),
                is_error: error_line == Some(index),
            })
            .collect()
    }

    pub fn report(&self) -> RenderReport {
        RenderReport {
            summary: self.summary().to_owned(),
            error: self.error().map(ToString::to_string),
            error_line: self.error().and_then(RenderError::line),
            warnings: self.warnings().to_vec(),
            variables: self.adjustable_variables(),
            grid: self.frame(),
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_for_each_state() {
        let mut visualizer = Visualizer::default();
        assert_eq!(visualizer.summary(), "No targeting data");

        visualizer.render("target_mode spiral");
        assert_eq!(visualizer.summary(), "Summary unavailable");
        assert!(visualizer.error().is_some());

        visualizer.render("target_mode none");
        assert_eq!(visualizer.summary(), "Mode: Self");

        visualizer.render("   ");
        assert!(matches!(visualizer.state(), RenderState::Empty));
    }

    #[test]
    fn sliders_rebuild_the_scenario() {
        let mut visualizer = Visualizer::default();
        visualizer.render("target_mode tile\nmax_range reach");
        assert_eq!(visualizer.adjustable_variables(), vec![("reach".to_owned(), 0)]);
        assert_eq!(visualizer.frame().cells_with(CellFlags::IN_RANGE).len(), 1);

        assert_eq!(visualizer.set_variable("reach", 2), Some(2));
        assert_eq!(visualizer.frame().cells_with(CellFlags::IN_RANGE).len(), 13);

        assert_eq!(visualizer.set_variable("reach", 40), Some(10));
        assert_eq!(visualizer.set_variable("size", 3), None);
    }

    #[test]
    fn obstacle_edits_clear_the_hover() {
        let mut visualizer = Visualizer::default();
        visualizer.render("target_mode tile\nmax_range 2");
        assert!(visualizer.hover(Cell::new(7, 8)).is_some());

        assert!(visualizer.toggle_obstacle(Cell::new(3, 3)));
        assert_eq!(visualizer.hovered(), None);
        assert!(visualizer.frame().flags(Cell::new(3, 3)).contains(CellFlags::BLOCKED));

        visualizer.apply_sample_obstacles();
        visualizer.clear_obstacles();
        assert_eq!(visualizer.board().obstacle_count(), 0);
    }

    #[test]
    fn hover_without_area_previews_the_target() {
        let mut visualizer = Visualizer::default();
        visualizer.render("target_mode tile\nmax_range 2");
        let preview = visualizer.hover(Cell::new(6, 7));
        assert_eq!(
            preview,
            Some(HoverPreview {
                target: Cell::new(6, 7),
                aoe: vec![Cell::new(6, 7)],
            })
        );
        assert_eq!(visualizer.hover(Cell::new(0, 0)), None);

        let frame = visualizer.frame();
        assert_eq!(frame.cells_with(CellFlags::TARGET), Vec::<Cell>::new());
    }

    #[test]
    fn frame_marks_hover_and_always_shown_area() {
        let mut visualizer = Visualizer::default();
        visualizer.render("target_mode none\nmax_aoe 1");
        let frame = visualizer.frame();
        assert_eq!(frame.cells_with(CellFlags::AOE).len(), 5);
        assert!(frame.flags(Cell::new(7, 7)).contains(CellFlags::ORIGIN | CellFlags::IN_RANGE));

        visualizer.render("target_mode tile\nmax_range 2\nmax_aoe 1");
        visualizer.hover(Cell::new(5, 7));
        let frame = visualizer.frame();
        assert_eq!(frame.cells_with(CellFlags::TARGET), vec![Cell::new(5, 7)]);
        assert_eq!(frame.cells_with(CellFlags::AOE).len(), 5);
    }

    #[test]
    fn error_line_is_annotated() {
        let mut visualizer = Visualizer::default();
        visualizer.render("target {\r\nmin_range 1\r\ntarget_mode chain\r\n}");
        let lines = visualizer.annotated_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].is_error);
        assert!(!lines[1].is_error);
        assert_eq!(visualizer.report().error_line, Some(2));
    }
}
