//! Bracketed coordinate lists (`custom_aoe`, `custom_range`).

use std::sync::LazyLock;

use regex::Regex;

use super::{FieldValue, ParsedRule};
use crate::grid::{Offset, Symmetry, symmetrize};

static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]+)\]").expect("coordinate pair regex must compile")
});

/// Reads `[a b]` pairs from the field's raw text.
///
/// Components may be separated by spaces or commas; extra components are ignored.
/// When the text holds no bracketed pair, the token list is re-read two tokens at
/// a time with brackets and commas stripped.
pub fn parse_coordinate_pairs(rule: &ParsedRule, key: &str) -> Vec<Offset> {
    let Some(field) = rule.field(key) else {
        return Vec::new();
    };

    let pairs: Vec<Offset> = PAIR
        .captures_iter(&field.text)
        .filter_map(|captures| {
            let mut parts = captures[1].split([',', ' ']).filter(|part| !part.is_empty());
            pair_from(parts.next()?, parts.next()?)
        })
        .collect();

    if !pairs.is_empty() {
        return pairs;
    }
    let FieldValue::List(tokens) = &field.value else {
        return pairs;
    };

    let cleaned: Vec<String> = tokens
        .iter()
        .map(|token| token.replace(['[', ']', ','], ""))
        .filter(|token| !token.is_empty())
        .collect();
    cleaned
        .chunks_exact(2)
        .filter_map(|chunk| pair_from(&chunk[0], &chunk[1]))
        .collect()
}

fn pair_from(row: &str, col: &str) -> Option<Offset> {
    let row = leading_float(row)?;
    let col = leading_float(col)?;
    (row.is_finite() && col.is_finite()).then_some(Offset::new(row, col))
}

/// Parses the longest numeric prefix, so `2)` or `1.5x` still read as numbers.
fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim();
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// `custom_aoe` offsets expanded by `aoe_symmetry`.
pub fn custom_aoe_offsets(rule: &ParsedRule) -> Vec<Offset> {
    let base = parse_coordinate_pairs(rule, "custom_aoe");
    symmetrize(&base, Symmetry::from_value(rule.scalar("aoe_symmetry")))
}

/// `custom_range` offsets expanded by `range_symmetry`.
pub fn custom_range_offsets(rule: &ParsedRule) -> Vec<Offset> {
    let base = parse_coordinate_pairs(rule, "custom_range");
    symmetrize(&base, Symmetry::from_value(rule.scalar("range_symmetry")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(f64, f64)> {
        let rule = ParsedRule::parse(text);
        parse_coordinate_pairs(&rule, "custom_aoe")
            .into_iter()
            .map(|offset| (offset.row, offset.col))
            .collect()
    }

    #[test]
    fn reads_bracketed_pairs() {
        assert_eq!(pairs("custom_aoe [1 0][0 1]"), vec![(1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(
            pairs("custom_aoe [[1, 2], [-1,0.5]]"),
            vec![(1.0, 2.0), (-1.0, 0.5)]
        );
    }

    #[test]
    fn falls_back_to_token_pairs() {
        // Each bracket holds a single component, so tokens are paired instead.
        assert_eq!(pairs("custom_aoe [1 ][ 2]"), vec![(1.0, 2.0)]);
        assert_eq!(pairs("custom_aoe 2 3"), Vec::<(f64, f64)>::new());
    }

    #[test]
    fn extra_components_are_ignored() {
        assert_eq!(pairs("custom_aoe [1 0 0 1]"), vec![(1.0, 0.0)]);
    }

    #[test]
    fn skips_non_numeric_pairs() {
        assert_eq!(pairs("custom_aoe [a b][2 2]"), vec![(2.0, 2.0)]);
    }

    #[test]
    fn symmetry_is_applied() {
        let rule = ParsedRule::parse("custom_aoe [1 0][0 1]\naoe_symmetry four_way");
        assert_eq!(custom_aoe_offsets(&rule).len(), 4);

        let rule = ParsedRule::parse("custom_range [2 1]\nrange_symmetry eight_way");
        assert_eq!(custom_range_offsets(&rule).len(), 8);
    }
}
