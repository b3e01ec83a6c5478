//! Field access shared by the scenario builders.

use std::str::FromStr;

use crate::error::Warning;
use crate::formula::number_from;
use crate::rule::{ParsedRule, vocabulary};
use crate::state::VariableRegistry;

/// A parsed rule paired with the variable registry its expressions read.
///
/// Every numeric lookup registers the variables it touches, so building a
/// scenario also discovers which sliders the rule needs.
pub struct FieldReader<'a> {
    pub rule: &'a ParsedRule,
    variables: &'a mut VariableRegistry,
    pub warnings: Vec<Warning>,
}

impl<'a> FieldReader<'a> {
    pub fn new(rule: &'a ParsedRule, variables: &'a mut VariableRegistry) -> Self {
        Self {
            rule,
            variables,
            warnings: Vec::new(),
        }
    }

    /// Numeric value of a scalar field; lists and unparsable text yield `None`.
    pub fn number(&mut self, key: &str) -> Option<f64> {
        let raw = self.rule.scalar(key)?;
        number_from(raw, self.variables)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.rule.flag(key)
    }

    /// Keyword field parsed into `T`; unknown values are recorded as warnings.
    pub fn keyword<T: FromStr>(&mut self, key: &str) -> Option<T> {
        vocabulary::parse_keyword(self.rule, key, &mut self.warnings)
    }

    /// Raw display text of a field, if it is a non-empty scalar.
    pub fn label(&self, key: &str) -> Option<&'a str> {
        self.rule.display_text(key)
    }
}
