//! Human-readable scenario summaries.

const SEPARATOR: &str = " · ";

/// Collects summary parts and joins them with ` · `.
#[derive(Clone, Debug, Default)]
pub struct Summary {
    parts: Vec<String>,
}

impl Summary {
    pub fn new(mode: &str) -> Self {
        Self {
            parts: vec![format!("Mode: {mode}")],
        }
    }

    pub fn push(&mut self, part: impl Into<String>) -> &mut Self {
        self.parts.push(part.into());
        self
    }

    pub fn finish(&self) -> String {
        self.parts.join(SEPARATOR)
    }
}

/// Shortest decimal rendering; whole numbers print without a fraction.
pub fn format_number(value: f64) -> String {
    format!("{}", value + 0.0)
}

/// `min–max`, or a single value when both sides read the same.
///
/// Each side shows the raw field text when the rule wrote one, so expressions
/// such as `size+1` appear as written.
pub fn range_label(raw_min: Option<&str>, raw_max: Option<&str>, min: f64, max: f64) -> String {
    let min_label = raw_min.map_or_else(|| format_number(min), str::to_owned);
    let max_label = raw_max.map_or_else(|| format_number(max), str::to_owned);
    join_range(min_label, max_label)
}

/// Numeric `min–max` for resolved step bounds.
pub fn step_label(min: f64, max: f64) -> String {
    join_range(format_number(min), format_number(max))
}

fn join_range(min: String, max: String) -> String {
    if min == max { min } else { format!("{min}–{max}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_join_with_middle_dot() {
        let mut summary = Summary::new("Tile");
        summary.push("Range 0–2").push("Requires line of sight");
        assert_eq!(summary.finish(), "Mode: Tile · Range 0–2 · Requires line of sight");
    }

    #[test]
    fn labels_collapse_equal_sides() {
        assert_eq!(step_label(1.0, 1.0), "1");
        assert_eq!(step_label(1.0, 3.5), "1–3.5");
        assert_eq!(range_label(None, Some("size+1"), 0.0, 2.0), "0–size+1");
        assert_eq!(range_label(Some("2"), None, 2.0, 2.0), "2");
        assert_eq!(format_number(-0.0), "0");
    }
}
