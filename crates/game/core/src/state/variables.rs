//! Named slider variables referenced by rule expressions.

use std::collections::{BTreeSet, HashMap};

use crate::config::GridConfig;

/// Case-insensitive variable store plus the set of names the current rule uses.
///
/// Names keep the spelling they were first seen with. The reserved `size`
/// variable is pinned to 1 and never reported as adjustable.
#[derive(Clone, Debug)]
pub struct VariableRegistry {
    /// lower-case name -> first-seen spelling
    canonical: HashMap<String, String>,
    /// first-seen spelling -> value
    values: HashMap<String, i32>,
    required: BTreeSet<String>,
}

impl Default for VariableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableRegistry {
    pub fn new() -> Self {
        let size = GridConfig::RESERVED_SIZE_NAME.to_owned();
        Self {
            canonical: HashMap::from([(size.clone(), size.clone())]),
            values: HashMap::from([(size, GridConfig::RESERVED_SIZE_VALUE)]),
            required: BTreeSet::new(),
        }
    }

    /// Forgets which variables the previous rule referenced. Values are kept.
    pub fn reset_required(&mut self) {
        self.required.clear();
    }

    /// Looks up `name` for an expression, registering it as required.
    ///
    /// Unseen names start at the slider default. Blank names resolve to the
    /// default without registering anything.
    pub fn resolve(&mut self, name: &str) -> i32 {
        match self.register(name) {
            Some(canonical) => self
                .values
                .get(&canonical)
                .copied()
                .unwrap_or(GridConfig::VARIABLE_DEFAULT),
            None => GridConfig::VARIABLE_DEFAULT,
        }
    }

    fn register(&mut self, name: &str) -> Option<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lower = trimmed.to_lowercase();
        if lower == GridConfig::RESERVED_SIZE_NAME {
            return Some(lower);
        }

        let canonical = self
            .canonical
            .entry(lower)
            .or_insert_with(|| trimmed.to_owned())
            .clone();
        self.values
            .entry(canonical.clone())
            .or_insert(GridConfig::VARIABLE_DEFAULT);
        self.required.insert(canonical.clone());
        Some(canonical)
    }

    /// Sets a slider value, clamped to the slider range.
    ///
    /// Returns the stored value, or `None` for the reserved `size` variable or a
    /// blank name.
    pub fn set(&mut self, name: &str, value: i32) -> Option<i32> {
        let trimmed = name.trim();
        let lower = trimmed.to_lowercase();
        if trimmed.is_empty() || lower == GridConfig::RESERVED_SIZE_NAME {
            return None;
        }

        let canonical = self
            .canonical
            .entry(lower)
            .or_insert_with(|| trimmed.to_owned())
            .clone();
        let clamped = value.clamp(GridConfig::VARIABLE_MIN, GridConfig::VARIABLE_MAX);
        self.values.insert(canonical, clamped);
        Some(clamped)
    }

    /// Current value without registering the name.
    pub fn value(&self, name: &str) -> Option<i32> {
        let canonical = self.canonical.get(&name.trim().to_lowercase())?;
        self.values.get(canonical).copied()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.canonical
            .get(&name.trim().to_lowercase())
            .is_some_and(|canonical| self.required.contains(canonical))
    }

    /// Required variables a user may adjust, sorted case-insensitively.
    pub fn adjustable(&self) -> Vec<(String, i32)> {
        let mut adjustable: Vec<(String, i32)> = self
            .required
            .iter()
            .filter(|name| !name.eq_ignore_ascii_case(GridConfig::RESERVED_SIZE_NAME))
            .map(|name| {
                let value = self
                    .values
                    .get(name)
                    .copied()
                    .unwrap_or(GridConfig::VARIABLE_DEFAULT);
                (name.clone(), value)
            })
            .collect();
        adjustable.sort_by(|(a, _), (b, _)| {
            a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
        });
        adjustable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_pinned_and_hidden() {
        let mut registry = VariableRegistry::new();
        assert_eq!(registry.resolve("SIZE"), 1);
        assert_eq!(registry.set("size", 7), None);
        assert_eq!(registry.resolve("size"), 1);
        assert!(registry.adjustable().is_empty());
    }

    #[test]
    fn names_are_case_insensitive_and_keep_first_spelling() {
        let mut registry = VariableRegistry::new();
        assert_eq!(registry.resolve("Level"), 0);
        assert_eq!(registry.set("LEVEL", 4), Some(4));
        assert_eq!(registry.resolve("level"), 4);
        assert_eq!(registry.adjustable(), vec![("Level".to_owned(), 4)]);
    }

    #[test]
    fn set_clamps_to_slider_range() {
        let mut registry = VariableRegistry::new();
        assert_eq!(registry.set("power", 42), Some(10));
        assert_eq!(registry.set("power", -3), Some(0));
    }

    #[test]
    fn reset_forgets_requirements_but_keeps_values() {
        let mut registry = VariableRegistry::new();
        registry.resolve("rank");
        registry.set("rank", 3);
        assert!(registry.is_required("rank"));

        registry.reset_required();
        assert!(!registry.is_required("rank"));
        assert!(registry.adjustable().is_empty());
        assert_eq!(registry.value("rank"), Some(3));
    }

    #[test]
    fn adjustable_sorts_case_insensitively() {
        let mut registry = VariableRegistry::new();
        for name in ["beta", "Alpha", "gamma", "size"] {
            registry.resolve(name);
        }
        let names: Vec<String> = registry.adjustable().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }
}
