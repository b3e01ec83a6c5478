//! Rule-text parsing.
//!
//! A rule block is a list of `key value` lines, optionally wrapped in
//! `target {` / `}`. Values are either a scalar string or a bracketed token list.
//! Parsing never fails; lines without a key/value separator are recorded and
//! skipped, and the scenario builder decides whether that is fatal.

pub mod coordinates;
pub mod vocabulary;

pub use coordinates::{custom_aoe_offsets, custom_range_offsets, parse_coordinate_pairs};
pub use vocabulary::{AoeMode, RangeMode, Restrictions, TargetMode, UNSUPPORTED_FIELDS};

use std::collections::BTreeMap;

/// Field key whose bracketed value may continue over several lines.
const MULTILINE_KEY: &str = "custom_aoe";

/// A field value normalized at parse time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    fn from_raw(raw: &str) -> Self {
        match raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            Some(inner) => Self::List(inner.split_whitespace().map(str::to_owned).collect()),
            None => Self::Scalar(raw.to_owned()),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }
}

/// One parsed field with the metadata needed for highlighting and re-parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub value: FieldValue,
    /// Zero-based source line of the key.
    pub line: usize,
    /// Raw value text, brackets included, before list splitting.
    pub text: String,
}

/// Result of parsing one rule block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedRule {
    lines: Vec<String>,
    fields: BTreeMap<String, Field>,
    first_malformed: Option<usize>,
}

impl ParsedRule {
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n");
        let lines: Vec<String> = normalized.split('\n').map(str::to_owned).collect();
        let mut fields = BTreeMap::new();
        let mut first_malformed = None;

        let mut index = 0;
        while index < lines.len() {
            let line_index = index;
            let line = lines[index].trim();
            index += 1;

            if line.is_empty() || line == "target {" || line == "}" {
                continue;
            }
            let Some((key, rest)) = line.split_once(' ') else {
                first_malformed.get_or_insert(line_index);
                continue;
            };

            let key = key.trim();
            let mut raw = rest.trim().to_owned();
            if key == MULTILINE_KEY && raw.starts_with('[') {
                let mut depth = bracket_depth(&raw);
                while depth > 0 && index < lines.len() {
                    let continuation = lines[index].trim();
                    index += 1;
                    depth += bracket_depth(continuation);
                    raw.push(' ');
                    raw.push_str(continuation);
                }
            }

            fields.insert(
                key.to_owned(),
                Field {
                    value: FieldValue::from_raw(&raw),
                    line: line_index,
                    text: raw,
                },
            );
        }

        tracing::debug!(
            fields = fields.len(),
            first_malformed = ?first_malformed,
            "parsed rule block"
        );

        Self {
            lines,
            fields,
            first_malformed,
        }
    }

    /// Source lines after newline normalization.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn first_malformed(&self) -> Option<usize> {
        self.first_malformed
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn line(&self, key: &str) -> Option<usize> {
        self.field(key).map(|field| field.line)
    }

    /// Scalar value of `key`; lists yield `None`.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(|field| field.value.as_scalar())
    }

    /// Trimmed, non-empty scalar text, as shown in summaries.
    pub fn display_text(&self, key: &str) -> Option<&str> {
        self.scalar(key).map(str::trim).filter(|text| !text.is_empty())
    }

    /// Lower-cased scalar, for keyword fields such as modes.
    pub fn keyword(&self, key: &str) -> Option<String> {
        self.scalar(key).map(|value| value.trim().to_ascii_lowercase())
    }

    /// Truthy only for `true` (any case) or `1`.
    pub fn flag(&self, key: &str) -> bool {
        self.scalar(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "1")
    }

    /// Token list; a non-empty scalar counts as a one-element list.
    pub fn list(&self, key: &str) -> Vec<&str> {
        match self.field(key).map(|field| &field.value) {
            Some(FieldValue::List(items)) => items.iter().map(String::as_str).collect(),
            Some(FieldValue::Scalar(value)) if !value.trim().is_empty() => vec![value.trim()],
            _ => Vec::new(),
        }
    }
}

fn bracket_depth(text: &str) -> i32 {
    text.chars().fold(0, |depth, ch| match ch {
        '[' => depth + 1,
        ']' => depth - 1,
        _ => depth,
    })
}
