//! Area-of-effect shapes shared by every targeting mode.

use crate::grid::{
    Cell, Direction, DirectionSet, Grid, Offset, cells_within_radius, directional_cone,
    directional_line, line_union, orient_offsets, perpendicular_line, translate_offsets,
};
use crate::rule::{AoeMode, custom_aoe_offsets};

use super::fields::FieldReader;
use super::summary::range_label;

/// Resolved `[min, max]` numeric bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_zero(self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    fn non_negative(self) -> Self {
        Self::new(self.min.max(0.0), self.max.max(0.0))
    }
}

/// Combines optional parsed bounds with defaults.
///
/// - `min` is the parsed min, else `default_min`.
/// - `max` is the parsed max, else the parsed min when one was given, else `default_max`.
/// - `max` is raised to `min` when lower.
pub fn resolve_bounds(
    min: Option<f64>,
    max: Option<f64>,
    default_min: f64,
    default_max: f64,
) -> Bounds {
    let resolved_min = min.unwrap_or(default_min);
    let resolved_max = match (max, min) {
        (Some(max), _) => max,
        (None, Some(_)) => resolved_min,
        (None, None) => default_max,
    };
    Bounds::new(resolved_min, resolved_max.max(resolved_min))
}

/// Cell pattern placed around an anchor cell.
#[derive(Clone, Debug, PartialEq)]
pub enum AoeShape {
    /// No area; the target alone is affected.
    Empty,

    /// The whole grid.
    All,

    /// Rule-supplied offsets, optionally turned toward the facing direction.
    Custom { offsets: Vec<Offset>, orient: bool },

    /// Manhattan band around the anchor.
    Radius(Bounds),

    /// Union of straight lines from the anchor.
    Lines {
        directions: DirectionSet,
        bounds: Bounds,
    },

    /// Line through the anchor, perpendicular to the facing direction.
    PerpLine(Bounds),

    /// Line from the anchor along the facing direction.
    Line(Bounds),

    /// Widening cone from the anchor along the facing direction.
    Cone(Bounds),
}

impl AoeShape {
    pub fn cells(&self, grid: Grid, anchor: Cell, facing: Option<Direction>) -> Vec<Cell> {
        match self {
            Self::Empty => Vec::new(),
            Self::All => grid.cells().collect(),
            Self::Custom { offsets, orient } => {
                let placed = if *orient {
                    orient_offsets(offsets, facing)
                } else {
                    offsets.clone()
                };
                translate_offsets(grid, anchor, &placed)
            }
            Self::Radius(bounds) => {
                let bounds = bounds.non_negative();
                cells_within_radius(grid, anchor, bounds.max, bounds.min)
            }
            Self::Lines { directions, bounds } => {
                line_union(grid, anchor, directions, bounds.min, bounds.max)
            }
            Self::PerpLine(bounds) => {
                perpendicular_line(grid, anchor, facing, bounds.min, bounds.max)
            }
            Self::Line(bounds) => facing
                .map(|direction| directional_line(grid, anchor, direction, bounds.min, bounds.max))
                .unwrap_or_default(),
            Self::Cone(bounds) => facing
                .map(|direction| directional_cone(grid, anchor, direction, bounds.min, bounds.max))
                .unwrap_or_default(),
        }
    }
}

/// An [`AoeShape`] plus the `aoe_excludes_self` filter.
#[derive(Clone, Debug, PartialEq)]
pub struct AoeSpec {
    pub shape: AoeShape,
    /// Drop the actor's own cell from every result.
    pub excludes_self: bool,
}

impl AoeSpec {
    pub fn cells(&self, grid: Grid, anchor: Cell, facing: Option<Direction>) -> Vec<Cell> {
        let mut cells = self.shape.cells(grid, anchor, facing);
        if self.excludes_self {
            let center = grid.center();
            cells.retain(|&cell| cell != center);
        }
        cells
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.shape, AoeShape::Custom { .. })
    }
}

/// Shape for the banded modes: nothing for zero bounds, the cross family as line
/// unions, `perpline`, and a radius band for everything else.
pub fn banded_shape(mode: Option<AoeMode>, bounds: Bounds) -> AoeShape {
    if bounds.is_zero() {
        return AoeShape::Empty;
    }
    match mode {
        Some(AoeMode::Perpline) => AoeShape::PerpLine(bounds),
        Some(mode) => match mode.line_directions() {
            Some(directions) => AoeShape::Lines { directions, bounds },
            None => AoeShape::Radius(bounds),
        },
        None => AoeShape::Radius(bounds),
    }
}

/// Area for modes whose AoE is anchored on the chosen cell (self and tile).
///
/// Priority: custom offsets, `all`, then nothing if the bounds are zero, then the
/// cross family, `perpline` (when `allow_perpline`), and finally a radius band.
pub struct AnchoredArea {
    pub spec: AoeSpec,
    /// Summary part such as `Splash 0–1`, if the area is non-empty.
    pub label: Option<String>,
}

pub fn anchored_area(
    fields: &mut FieldReader<'_>,
    mode: Option<AoeMode>,
    allow_perpline: bool,
) -> AnchoredArea {
    let bounds = resolve_bounds(fields.number("min_aoe"), fields.number("max_aoe"), 0.0, 0.0);
    let offsets = match mode {
        Some(AoeMode::Custom) => custom_aoe_offsets(fields.rule),
        _ => Vec::new(),
    };
    let orient = !fields.flag("dont_orient_aoe");

    let shape = if !offsets.is_empty() {
        AoeShape::Custom { offsets, orient }
    } else if mode == Some(AoeMode::All) {
        AoeShape::All
    } else {
        let banded = mode.filter(|&mode| allow_perpline || mode != AoeMode::Perpline);
        banded_shape(banded, bounds)
    };

    let label = match &shape {
        AoeShape::Empty => None,
        AoeShape::Custom { .. } => Some("Splash custom".to_owned()),
        AoeShape::All => Some("Splash all".to_owned()),
        _ => Some(format!(
            "Splash {}",
            range_label(
                fields.label("min_aoe"),
                fields.label("max_aoe"),
                bounds.min,
                bounds.max
            )
        )),
    };

    AnchoredArea {
        spec: AoeSpec {
            shape,
            excludes_self: fields.flag("aoe_excludes_self"),
        },
        label,
    }
}
