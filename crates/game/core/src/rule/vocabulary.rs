//! Typed vocabulary for the keyword fields of a rule.

use std::str::FromStr;

use bitflags::bitflags;
use strum::{AsRefStr, Display, EnumString};

use super::ParsedRule;
use crate::error::Warning;
use crate::grid::{Direction, DirectionSet};

/// Fields of the rule dialect that are recognized but not simulated.
pub const UNSUPPORTED_FIELDS: [&str; 8] = [
    "allow_diagonals",
    "as_the_crow_flies",
    "shotgun_mode",
    "min_targets",
    "max_targets",
    "aoe_chance",
    "randomize_target_within_range",
    "prioritize_dont_change_direction",
];

/// Selection topology named by `target_mode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    /// The actor's own cell.
    #[strum(serialize = "none")]
    SelfOnly,
    Tile,
    Direction,
    #[strum(serialize = "direction8")]
    Direction8,
}

impl TargetMode {
    /// Selection directions for the directional modes.
    pub fn directions(self) -> DirectionSet {
        match self {
            Self::Direction8 => Direction::all_eight(),
            _ => Direction::cardinal(),
        }
    }
}

/// Range topology for `tile` mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RangeMode {
    /// Manhattan band.
    #[default]
    Standard,
    /// Chebyshev band.
    Square,
    Cross,
    Diagcross,
    #[strum(serialize = "8cross")]
    EightCross,
    /// Fixed offsets from `custom_range`.
    Custom,
}

impl RangeMode {
    /// Line directions for the cross family, `None` for banded or custom ranges.
    pub fn line_directions(self) -> Option<DirectionSet> {
        match self {
            Self::Cross => Some(Direction::cardinal()),
            Self::Diagcross => Some(Direction::diagonal()),
            Self::EightCross => Some(Direction::all_eight()),
            Self::Standard | Self::Square | Self::Custom => None,
        }
    }
}

/// Area-of-effect shape named by `aoe_mode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AoeMode {
    Standard,
    Custom,
    Perpline,
    Cross,
    Diagcross,
    #[strum(serialize = "8cross")]
    EightCross,
    All,
    Line,
    Cone,
}

impl AoeMode {
    pub fn line_directions(self) -> Option<DirectionSet> {
        match self {
            Self::Cross => Some(Direction::cardinal()),
            Self::Diagcross => Some(Direction::diagonal()),
            Self::EightCross => Some(Direction::all_eight()),
            _ => None,
        }
    }
}

bitflags! {
    /// Restriction tokens gathered from `restrictions` and the boolean shorthand fields.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Restrictions: u8 {
        const STRAIGHT_SHOT = 1 << 0;
        const MUST_MOVE = 1 << 1;
        const LINE_OF_SIGHT = 1 << 2;
        const FIT_2X2 = 1 << 3;
        const MUST_BE_MOVEABLE = 1 << 4;
    }
}

impl Restrictions {
    pub fn from_token(token: &str) -> Option<Self> {
        let flag = match token.trim().to_ascii_lowercase().as_str() {
            "straight_shot" => Self::STRAIGHT_SHOT,
            "must_move" => Self::MUST_MOVE,
            "must_have_line_of_sight"
            | "must_have_line_of_sight_unpurgable"
            | "requires_line_of_sight"
            | "needs_los"
            | "line_of_sight" => Self::LINE_OF_SIGHT,
            "must_fit_2x2_character" => Self::FIT_2X2,
            "must_be_moveable" => Self::MUST_BE_MOVEABLE,
            _ => return None,
        };
        Some(flag)
    }

    /// Tokens from `restrictions` plus the `straight_shot`, `must_move`, and
    /// `requires_line_of_sight` boolean fields.
    pub fn from_rule(rule: &ParsedRule) -> Self {
        let mut restrictions = rule
            .list("restrictions")
            .into_iter()
            .filter_map(Self::from_token)
            .collect::<Self>();

        if rule.flag("straight_shot") {
            restrictions |= Self::STRAIGHT_SHOT;
        }
        if rule.flag("must_move") {
            restrictions |= Self::MUST_MOVE;
        }
        if rule.flag("requires_line_of_sight") {
            restrictions |= Self::LINE_OF_SIGHT;
        }
        restrictions
    }

    /// A straight shot implies line of sight.
    pub fn requires_line(self) -> bool {
        self.intersects(Self::LINE_OF_SIGHT | Self::STRAIGHT_SHOT)
    }
}

/// Reads a keyword field into `T`.
///
/// Absent fields give `None`. Unknown values give `None` and push an
/// [`Warning::UnrecognizedValue`].
pub fn parse_keyword<T: FromStr>(
    rule: &ParsedRule,
    key: &str,
    warnings: &mut Vec<Warning>,
) -> Option<T> {
    let value = rule.keyword(key).filter(|value| !value.is_empty())?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warnings.push(Warning::UnrecognizedValue {
                field: key.to_owned(),
                value,
            });
            None
        }
    }
}

/// Diagnostics for fields and restriction tokens the engine does not simulate.
pub fn unsupported_warnings(rule: &ParsedRule, mode: TargetMode) -> Vec<Warning> {
    let mut warnings: Vec<Warning> = UNSUPPORTED_FIELDS
        .iter()
        .filter(|field| rule.contains(field))
        .map(|field| Warning::UnsupportedField((*field).to_owned()))
        .collect();

    if mode != TargetMode::Tile
        && rule
            .list("restrictions")
            .into_iter()
            .filter_map(Restrictions::from_token)
            .any(|flag| flag == Restrictions::MUST_BE_MOVEABLE)
    {
        warnings.push(Warning::UnsupportedRestriction {
            field: "restrictions".into(),
            token: "must_be_moveable".into(),
        });
    }

    for token in rule.list("aoe_restrictions") {
        if Restrictions::from_token(token) == Some(Restrictions::MUST_BE_MOVEABLE) {
            warnings.push(Warning::UnsupportedRestriction {
                field: "aoe_restrictions".into(),
                token: token.to_owned(),
            });
        } else {
            warnings.push(Warning::IgnoredRestriction {
                field: "aoe_restrictions".into(),
                token: token.to_owned(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!("none".parse::<TargetMode>(), Ok(TargetMode::SelfOnly));
        assert_eq!("TILE".parse::<TargetMode>(), Ok(TargetMode::Tile));
        assert_eq!("direction8".parse::<TargetMode>(), Ok(TargetMode::Direction8));
        assert!("chain".parse::<TargetMode>().is_err());
        assert_eq!(TargetMode::SelfOnly.to_string(), "none");
    }

    #[test]
    fn cross_family_spellings() {
        assert_eq!("8cross".parse::<RangeMode>(), Ok(RangeMode::EightCross));
        assert_eq!("diagcross".parse::<AoeMode>(), Ok(AoeMode::Diagcross));
        assert_eq!(AoeMode::EightCross.as_ref(), "8cross");
        assert_eq!(RangeMode::Cross.line_directions().map(|set| set.len()), Some(4));
        assert_eq!(AoeMode::EightCross.line_directions().map(|set| set.len()), Some(8));
        assert!(AoeMode::Cone.line_directions().is_none());
    }

    #[test]
    fn restrictions_merge_tokens_and_fields() {
        let rule = ParsedRule::parse(
            "restrictions [needs_los must_fit_2x2_character bogus]\nmust_move true",
        );
        let restrictions = Restrictions::from_rule(&rule);
        assert!(restrictions.contains(Restrictions::LINE_OF_SIGHT));
        assert!(restrictions.contains(Restrictions::FIT_2X2));
        assert!(restrictions.contains(Restrictions::MUST_MOVE));
        assert!(!restrictions.contains(Restrictions::STRAIGHT_SHOT));

        let straight = Restrictions::from_rule(&ParsedRule::parse("straight_shot 1"));
        assert!(straight.requires_line());
    }

    #[test]
    fn unknown_keywords_warn() {
        let rule = ParsedRule::parse("aoe_mode spiral\nrange_mode square");
        let mut warnings = Vec::new();
        assert_eq!(parse_keyword::<AoeMode>(&rule, "aoe_mode", &mut warnings), None);
        assert_eq!(
            parse_keyword::<RangeMode>(&rule, "range_mode", &mut warnings),
            Some(RangeMode::Square)
        );
        assert_eq!(
            warnings,
            vec![Warning::UnrecognizedValue {
                field: "aoe_mode".into(),
                value: "spiral".into(),
            }]
        );
    }

    #[test]
    fn unsupported_fields_and_tokens_warn() {
        let rule = ParsedRule::parse(
            "shotgun_mode true\nmax_targets 3\nrestrictions [must_be_moveable]\naoe_restrictions [must_be_moveable not_self]",
        );
        let tile = unsupported_warnings(&rule, TargetMode::Tile);
        assert_eq!(tile.len(), 4);
        assert!(tile.contains(&Warning::UnsupportedField("shotgun_mode".into())));
        assert!(tile.contains(&Warning::IgnoredRestriction {
            field: "aoe_restrictions".into(),
            token: "not_self".into(),
        }));

        let direction = unsupported_warnings(&rule, TargetMode::Direction);
        assert_eq!(direction.len(), 5);
        assert!(direction.contains(&Warning::UnsupportedRestriction {
            field: "restrictions".into(),
            token: "must_be_moveable".into(),
        }));
    }
}
