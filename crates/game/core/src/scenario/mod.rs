//! Scenario builders: turn a parsed rule into targeting queries.
//!
//! A [`Scenario`] answers two questions for the current board: can the actor
//! target a cell, and which cells would that target affect. Builders run once
//! per render; the queries run for every cell on every hover.
pub mod aoe;
pub mod dash;
pub mod direction;
pub mod fields;
pub mod self_cast;
pub mod summary;
pub mod tile;

pub use dash::{DashLane, DashScenario};
pub use direction::{DirectionInputs, DirectionScenario};
pub use fields::FieldReader;
pub use self_cast::SelfCastScenario;
pub use tile::TileScenario;

use crate::error::{RenderError, Warning};
use crate::grid::{Cell, Grid};
use crate::rule::{ParsedRule, TargetMode, vocabulary};
use crate::state::{Board, VariableRegistry};

/// Query contract shared by every targeting mode.
///
/// Queries take the live [`Board`] so obstacle edits apply without a rebuild.
pub trait TargetingScenario {
    /// One-line description such as `Mode: Tile · Range 0–2`.
    fn summary(&self) -> &str;

    /// Whether hovering `cell` selects a target.
    fn is_targetable(&self, board: &Board, cell: Cell) -> bool;

    /// Cells affected when `cell` is the hovered target; empty if it is not one.
    fn aoe_cells(&self, board: &Board, cell: Cell) -> Vec<Cell>;

    /// The area is anchored on the actor and shown without any hover.
    fn always_show_aoe(&self) -> bool {
        false
    }
}

// ============================================================================
// Scenario
// ============================================================================

/// A built scenario, one variant per targeting mode.
#[derive(Debug)]
pub enum Scenario {
    SelfCast(SelfCastScenario),
    Tile(TileScenario),
    Direction(DirectionScenario),
    Dash(DashScenario),
}

impl Scenario {
    fn inner(&self) -> &dyn TargetingScenario {
        match self {
            Scenario::SelfCast(scenario) => scenario,
            Scenario::Tile(scenario) => scenario,
            Scenario::Direction(scenario) => scenario,
            Scenario::Dash(scenario) => scenario,
        }
    }

    pub fn is_dash(&self) -> bool {
        matches!(self, Scenario::Dash(_))
    }
}

impl TargetingScenario for Scenario {
    fn summary(&self) -> &str {
        self.inner().summary()
    }

    fn is_targetable(&self, board: &Board, cell: Cell) -> bool {
        self.inner().is_targetable(board, cell)
    }

    fn aoe_cells(&self, board: &Board, cell: Cell) -> Vec<Cell> {
        self.inner().aoe_cells(board, cell)
    }

    fn always_show_aoe(&self) -> bool {
        self.inner().always_show_aoe()
    }
}

impl From<SelfCastScenario> for Scenario {
    fn from(scenario: SelfCastScenario) -> Self {
        Self::SelfCast(scenario)
    }
}

impl From<TileScenario> for Scenario {
    fn from(scenario: TileScenario) -> Self {
        Self::Tile(scenario)
    }
}

impl From<DirectionScenario> for Scenario {
    fn from(scenario: DirectionScenario) -> Self {
        Self::Direction(scenario)
    }
}

impl From<DashScenario> for Scenario {
    fn from(scenario: DashScenario) -> Self {
        Self::Dash(scenario)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Host-supplied switches that are not part of the rule text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderOptions {
    /// Simulate directional rules with a range as dash attacks.
    pub dash_attack: bool,
    /// Notes appended to the warnings of every successful build.
    pub extra_warnings: Vec<String>,
}

/// A successful build.
#[derive(Debug)]
pub struct Rendered {
    pub mode: TargetMode,
    pub scenario: Scenario,
    pub warnings: Vec<Warning>,
}

/// Parses and builds `text`. Whitespace-only text renders nothing.
///
/// Required variables are re-discovered from scratch, so callers should show
/// [`VariableRegistry::adjustable`] afterwards.
pub fn render(
    text: &str,
    grid: Grid,
    variables: &mut VariableRegistry,
    options: &RenderOptions,
) -> Result<Option<Rendered>, RenderError> {
    variables.reset_required();
    if text.trim().is_empty() {
        return Ok(None);
    }
    let rule = ParsedRule::parse(text);
    build_scenario(&rule, grid, variables, options).map(Some)
}

/// Builds the scenario for an already parsed rule.
pub fn build_scenario(
    rule: &ParsedRule,
    grid: Grid,
    variables: &mut VariableRegistry,
    options: &RenderOptions,
) -> Result<Rendered, RenderError> {
    let mode = target_mode(rule).inspect_err(|err| {
        tracing::debug!(code = err.error_code(), line = ?err.line(), "rule rejected");
    })?;

    let mut fields = FieldReader::new(rule, variables);
    let scenario: Scenario = match mode {
        TargetMode::SelfOnly => SelfCastScenario::build(&mut fields, grid).into(),
        TargetMode::Tile => TileScenario::build(&mut fields, grid).into(),
        TargetMode::Direction | TargetMode::Direction8 => {
            let inputs = DirectionInputs::read(&mut fields);
            if DashScenario::applies(mode, &inputs, options.dash_attack) {
                DashScenario::build(&inputs, grid).into()
            } else {
                DirectionScenario::build(&inputs, mode, grid).into()
            }
        }
    };

    let mut warnings = vocabulary::unsupported_warnings(rule, mode);
    warnings.append(&mut fields.warnings);
    warnings.extend(
        options
            .extra_warnings
            .iter()
            .map(|note| note.trim())
            .filter(|note| !note.is_empty())
            .map(|note| Warning::Extra(note.to_owned())),
    );
    for warning in &warnings {
        tracing::warn!(%warning, "rule partially simulated");
    }

    tracing::debug!(
        mode = %mode,
        fields = rule.len(),
        warnings = warnings.len(),
        dash = scenario.is_dash(),
        "scenario built"
    );

    Ok(Rendered {
        mode,
        scenario,
        warnings,
    })
}

/// Reads `target_mode`, mapping its absence or an unknown value to a [`RenderError`].
fn target_mode(rule: &ParsedRule) -> Result<TargetMode, RenderError> {
    if rule.is_empty() {
        if let Some(line) = rule.first_malformed() {
            return Err(RenderError::ParseMalformed { line });
        }
    }

    let raw = rule.keyword("target_mode").unwrap_or_default();
    if raw.is_empty() {
        let line = rule
            .line("target_mode")
            .or(rule.first_malformed())
            .unwrap_or(0);
        return Err(RenderError::MissingMode { line });
    }

    raw.parse::<TargetMode>()
        .map_err(|_| RenderError::UnsupportedMode {
            line: rule.line("target_mode"),
            mode: raw,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str, options: &RenderOptions) -> Result<Option<Rendered>, RenderError> {
        render(text, Grid::default(), &mut VariableRegistry::new(), options)
    }

    #[test]
    fn blank_text_renders_nothing() {
        assert!(matches!(build("  \n\t", &RenderOptions::default()), Ok(None)));
    }

    #[test]
    fn fatal_errors_carry_their_line() {
        let options = RenderOptions::default();
        let malformed = build("target_mode\n", &options).err();
        assert_eq!(malformed, Some(RenderError::ParseMalformed { line: 0 }));

        let missing = build("max_range 2\noops\nmin_range 1", &options).err();
        assert_eq!(missing, Some(RenderError::MissingMode { line: 1 }));

        let empty_mode = build("min_range 1\ntarget_mode  ", &options).err();
        assert_eq!(empty_mode, Some(RenderError::MissingMode { line: 1 }));

        let unknown = build("target {\ntarget_mode Chain\n}", &options).err();
        assert_eq!(
            unknown,
            Some(RenderError::UnsupportedMode {
                mode: "chain".into(),
                line: Some(1),
            })
        );
    }

    #[test]
    fn warnings_collect_in_order() {
        let options = RenderOptions {
            dash_attack: false,
            extra_warnings: vec!["  ".into(), "preview only".into()],
        };
        let rendered = build(
            "target_mode tile\nshotgun_mode true\nrange_mode spiral",
            &options,
        )
        .ok()
        .flatten();
        let Some(rendered) = rendered else {
            panic!("tile rule should build");
        };
        assert_eq!(
            rendered.warnings,
            vec![
                Warning::UnsupportedField("shotgun_mode".into()),
                Warning::UnrecognizedValue {
                    field: "range_mode".into(),
                    value: "spiral".into(),
                },
                Warning::Extra("preview only".into()),
            ]
        );
    }

    #[test]
    fn dash_option_switches_the_directional_builder() {
        let text = "target_mode direction\nmax_range 3";
        let plain = build(text, &RenderOptions::default()).ok().flatten();
        assert!(plain.is_some_and(|rendered| !rendered.scenario.is_dash()));

        let options = RenderOptions {
            dash_attack: true,
            ..RenderOptions::default()
        };
        let dash = build(text, &options).ok().flatten();
        assert!(dash.is_some_and(|rendered| rendered.scenario.is_dash()));

        let eight_way = build("target_mode direction8\nmax_range 3", &options)
            .ok()
            .flatten();
        assert!(eight_way.is_some_and(|rendered| !rendered.scenario.is_dash()));
    }
}
