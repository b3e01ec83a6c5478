//! Error and diagnostic types for rule rendering.
//!
//! Two tiers exist:
//!
//! - [`RenderError`]: fatal problems with the rule text. No scenario is built and
//!   the host should mark the offending line.
//! - [`Warning`]: fields the dialect defines but the engine does not model. The
//!   scenario still builds and the warning is surfaced next to it.
//!
//! Query functions on a built scenario never fail; unparsable numbers degrade
//! to documented defaults instead.

/// Severity level of a diagnostic, used by front ends to pick styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid rule text; nothing can be rendered until it is fixed.
    Validation,

    /// Rendered, but part of the rule is ignored.
    Warning,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Warning => "warning",
        }
    }

    /// Returns true if a scenario can still be shown.
    pub const fn is_renderable(&self) -> bool {
        matches!(self, Self::Warning)
    }
}

/// Fatal rule-text errors. Each carries the zero-based source line to highlight.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// No `key value` line could be extracted from the block.
    #[error("could not parse the target block (line {})", .line + 1)]
    ParseMalformed { line: usize },

    /// `target_mode` is absent or empty.
    #[error("target_mode is missing (line {})", .line + 1)]
    MissingMode { line: usize },

    /// `target_mode` names a mode the visualizer does not know.
    #[error("unsupported target_mode: {mode}")]
    UnsupportedMode { mode: String, line: Option<usize> },
}

impl RenderError {
    /// Line to mark in the raw text view, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ParseMalformed { line } | Self::MissingMode { line } => Some(*line),
            Self::UnsupportedMode { line, .. } => *line,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    /// Stable identifier for logs and tests.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ParseMalformed { .. } => "parse_malformed",
            Self::MissingMode { .. } => "missing_mode",
            Self::UnsupportedMode { .. } => "unsupported_mode",
        }
    }
}

/// Non-fatal diagnostics attached to a successfully built scenario.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// A field from the rule dialect that the visualizer does not model.
    #[error("field `{0}` is not simulated and was ignored")]
    UnsupportedField(String),

    /// A restriction token whose semantics are not modelled where it appears.
    #[error("restriction `{token}` is not simulated in `{field}`")]
    UnsupportedRestriction { field: String, token: String },

    /// A restriction token that has no effect where it appears.
    #[error("restriction `{token}` in `{field}` is ignored")]
    IgnoredRestriction { field: String, token: String },

    /// A field value outside the known vocabulary; the default was used instead.
    #[error("unrecognized {field} `{value}`, using the default")]
    UnrecognizedValue { field: String, value: String },

    /// Host-supplied note passed through render options.
    #[error("{0}")]
    Extra(String),
}

impl Warning {
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }
}
