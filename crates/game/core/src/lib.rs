//! Targeting rule engine for ability previews.
//!
//! `targeting-core` parses a small `key value` rule dialect describing how an
//! ability picks its target and what area it affects, then answers per-cell
//! queries on a square grid with the actor at the center. Numeric fields may be
//! arithmetic expressions over user-adjustable variables, and obstacles block
//! line of sight and dash movement.
//!
//! The usual entry point is [`session::Visualizer`]; lower-level callers can use
//! [`scenario::render`] with their own [`Board`] and [`VariableRegistry`].
pub mod config;
pub mod error;
pub mod formula;
pub mod grid;
pub mod rule;
pub mod scenario;
pub mod session;
pub mod state;

pub use config::GridConfig;
pub use error::{ErrorSeverity, RenderError, Warning};
pub use grid::{Cell, Direction, DirectionSet, Grid};
pub use rule::{AoeMode, ParsedRule, RangeMode, Restrictions, TargetMode};
pub use scenario::{RenderOptions, Rendered, Scenario, TargetingScenario, build_scenario, render};
pub use session::{
    AnnotatedLine, CellFlags, GridSnapshot, HoverPreview, RenderReport, RenderState, Visualizer,
};
pub use state::{Board, FingerprintMemo, VariableRegistry};
