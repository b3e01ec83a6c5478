//! Rule file loading.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads a rule file as UTF-8 text.
///
/// A leading byte-order mark is dropped so the first key parses normally.
pub fn load_rule(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
    let text = text.strip_prefix('\u{feff}').map(str::to_owned).unwrap_or(text);
    tracing::debug!(path = %path.display(), bytes = text.len(), "rule file loaded");
    Ok(text)
}
