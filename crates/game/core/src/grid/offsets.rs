//! Fractional offset lists: symmetry expansion, orientation, and translation onto the grid.

use std::collections::HashSet;

use strum::{AsRefStr, Display, EnumString};

use super::{Cell, Direction, Grid, push_unique};

/// A relative `(row, col)` offset as written in a rule.
///
/// When oriented, `row` is read as the forward distance and `col` as the
/// lateral one (see [`orient_offsets`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offset {
    pub row: f64,
    pub col: f64,
}

impl Offset {
    pub const fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Quarter turn: `(row, col) -> (-col, row)`.
    pub fn rotate90(self) -> Self {
        Self::new(-self.col, self.row)
    }

    pub fn transpose(self) -> Self {
        Self::new(self.col, self.row)
    }

    /// Identity key for de-duplication; `-0.0` and `0.0` compare equal.
    fn key(self) -> (u64, u64) {
        ((self.row + 0.0).to_bits(), (self.col + 0.0).to_bits())
    }
}

/// Symmetry expansion applied to custom offset lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symmetry {
    /// Offsets are used as written.
    #[default]
    Identity,

    /// Adds the three quarter-turn images of every offset.
    #[strum(to_string = "four_way", serialize = "four-way")]
    FourWay,

    /// Four-way images of the offsets and of their transposes.
    #[strum(to_string = "eight_way", serialize = "eight-way")]
    EightWay,
}

impl Symmetry {
    /// Reads a rule value; absent or unknown spellings mean no expansion.
    pub fn from_value(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.trim().parse::<Symmetry>().ok())
            .unwrap_or_default()
    }
}

/// Expands `offsets` under `symmetry`, keeping first-seen order and dropping
/// duplicates. Applying the same symmetry twice yields the same set.
pub fn symmetrize(offsets: &[Offset], symmetry: Symmetry) -> Vec<Offset> {
    if symmetry == Symmetry::Identity {
        return offsets.to_vec();
    }

    let mut result = Vec::new();
    let mut seen = HashSet::new();
    let mut add_rotations = |offset: Offset| {
        let mut image = offset;
        for _ in 0..4 {
            if seen.insert(image.key()) {
                result.push(image);
            }
            image = image.rotate90();
        }
    };

    for &offset in offsets {
        add_rotations(offset);
    }
    if symmetry == Symmetry::EightWay {
        for &offset in offsets {
            add_rotations(offset.transpose());
        }
    }
    result
}

/// Aligns `(forward, lateral)` offsets with `direction`:
/// `direction * forward + rotate90(direction) * lateral`.
///
/// Without a direction the offsets are returned unchanged.
pub fn orient_offsets(offsets: &[Offset], direction: Option<Direction>) -> Vec<Offset> {
    let Some(direction) = direction else {
        return offsets.to_vec();
    };
    let right = direction.rotate90();
    let (dr, dc) = (direction.row as f64, direction.col as f64);
    let (rr, rc) = (right.row as f64, right.col as f64);

    offsets
        .iter()
        .map(|offset| {
            Offset::new(
                dr * offset.row + rr * offset.col,
                dc * offset.row + rc * offset.col,
            )
        })
        .collect()
}

/// Places offsets around `anchor`, rounding half up to whole cells and dropping
/// anything off-grid or non-finite.
pub fn translate_offsets(grid: Grid, anchor: Cell, offsets: &[Offset]) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut seen = HashSet::new();
    for offset in offsets {
        let row = anchor.row as f64 + offset.row;
        let col = anchor.col as f64 + offset.col;
        if !row.is_finite() || !col.is_finite() {
            continue;
        }
        let cell = Cell::new(round_half_up(row), round_half_up(col));
        if grid.contains(cell) {
            push_unique(&mut cells, &mut seen, cell);
        }
    }
    cells
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(pairs: &[(f64, f64)]) -> Vec<Offset> {
        pairs.iter().map(|&(row, col)| Offset::new(row, col)).collect()
    }

    fn keys(list: &[Offset]) -> HashSet<(u64, u64)> {
        list.iter().map(|offset| offset.key()).collect()
    }

    #[test]
    fn four_way_of_two_unit_offsets_is_a_plus() {
        let base = offsets(&[(1.0, 0.0), (0.0, 1.0)]);
        let expanded = symmetrize(&base, Symmetry::FourWay);
        assert_eq!(expanded.len(), 4);
        assert_eq!(
            keys(&expanded),
            keys(&offsets(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]))
        );
    }

    #[test]
    fn eight_way_adds_transposes() {
        let base = offsets(&[(2.0, 1.0)]);
        assert_eq!(symmetrize(&base, Symmetry::FourWay).len(), 4);
        assert_eq!(symmetrize(&base, Symmetry::EightWay).len(), 8);
    }

    #[test]
    fn symmetry_is_idempotent() {
        let base = offsets(&[(2.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        for symmetry in [Symmetry::Identity, Symmetry::FourWay, Symmetry::EightWay] {
            let once = symmetrize(&base, symmetry);
            let twice = symmetrize(&once, symmetry);
            assert_eq!(keys(&once), keys(&twice), "{symmetry} not idempotent");
        }
    }

    #[test]
    fn symmetry_spellings() {
        assert_eq!(Symmetry::from_value(Some("four_way")), Symmetry::FourWay);
        assert_eq!(Symmetry::from_value(Some(" Eight-Way ")), Symmetry::EightWay);
        assert_eq!(Symmetry::from_value(Some("radial")), Symmetry::Identity);
        assert_eq!(Symmetry::from_value(None), Symmetry::Identity);
    }

    #[test]
    fn orientation_rotates_forward_and_lateral() {
        // One step forward, one to the side.
        let base = offsets(&[(1.0, 1.0)]);
        let north = orient_offsets(&base, Some(Direction::NORTH));
        assert_eq!(north, offsets(&[(-1.0, -1.0)]));
        let east = orient_offsets(&base, Some(Direction::EAST));
        assert_eq!(east, offsets(&[(-1.0, 1.0)]));
        assert_eq!(orient_offsets(&base, None), base);
    }

    #[test]
    fn translation_rounds_and_clips() {
        let grid = Grid::default();
        let anchor = Cell::new(0, 0);
        let cells = translate_offsets(
            grid,
            anchor,
            &offsets(&[(0.5, 0.4), (-1.0, 0.0), (1.0, 1.0), (1.4, 1.4)]),
        );
        assert_eq!(cells, vec![Cell::new(1, 0), Cell::new(1, 1)]);
    }
}
