//! Expression evaluation against the variable registry.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Expr, parse};
use crate::state::VariableRegistry;

// ============================================================================
// Patterns
// ============================================================================

static PERCENT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)%$").expect("percent literal regex must compile")
});

static NUMBER_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d+(?:\.\d+)?$").expect("number literal regex must compile")
});

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier regex must compile")
});

static EMBEDDED_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)%").expect("embedded percent regex must compile")
});

static ARITHMETIC_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9+\-*/().\s]+$").expect("arithmetic charset regex must compile")
});

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("integer regex must compile"));

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluates a parsed expression tree.
pub fn evaluate(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(value) => *value,
        Expr::Neg(inner) => -evaluate(inner),
        Expr::Add(left, right) => evaluate(left) + evaluate(right),
        Expr::Sub(left, right) => evaluate(left) - evaluate(right),
        Expr::Mul(left, right) => evaluate(left) * evaluate(right),
        Expr::Div(left, right) => evaluate(left) / evaluate(right),
        Expr::Pow(base, exponent) => evaluate(base).powf(evaluate(exponent)),
    }
}

/// Resolves a raw field value to a number.
///
/// In order: blank text is `None`; `N%` is `N / 100`; a plain literal is itself;
/// otherwise each identifier is replaced by its variable value (registering it
/// as required), embedded `N%` become `N / 100`, and the remaining arithmetic is
/// evaluated. Anything left that is not arithmetic, and any non-finite result,
/// yields `None`.
pub fn evaluate_expression(raw: &str, variables: &mut VariableRegistry) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(captures) = PERCENT_LITERAL.captures(text) {
        return captures[1].parse::<f64>().ok().map(|value| value / 100.0);
    }
    if NUMBER_LITERAL.is_match(text) {
        return text.parse::<f64>().ok().filter(|value| value.is_finite());
    }

    let substituted = IDENTIFIER.replace_all(text, |captures: &Captures| {
        variables.resolve(&captures[0]).to_string()
    });
    let expression = EMBEDDED_PERCENT.replace_all(&substituted, |captures: &Captures| {
        captures[1]
            .parse::<f64>()
            .map(|value| (value / 100.0).to_string())
            .unwrap_or_else(|_| captures[0].to_owned())
    });
    if !ARITHMETIC_ONLY.is_match(&expression) {
        return None;
    }

    match parse(&expression) {
        Ok(expr) => Some(evaluate(&expr)).filter(|value| value.is_finite()),
        Err(err) => {
            tracing::trace!(expression = %expression, error = %err, "expression rejected");
            None
        }
    }
}

/// [`evaluate_expression`], falling back to the first signed integer in the text.
pub fn number_from(raw: &str, variables: &mut VariableRegistry) -> Option<f64> {
    evaluate_expression(raw, variables).or_else(|| {
        FIRST_INTEGER
            .find(raw)
            .and_then(|found| found.as_str().parse::<i64>().ok())
            .map(|value| value as f64)
    })
}
