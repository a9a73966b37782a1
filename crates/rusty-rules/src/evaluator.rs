// File: src/evaluator.rs
// Purpose: Evaluates one rule against one sanitized value

use crate::config::Settings;
use crate::patterns::{self, PatternKind};
use crate::rule::{Directive, RuleSpec};
use crate::tree::DataTree;
use crate::unique::UniquenessCheck;
use std::sync::Arc;

/// Evaluates rules. Every failure mode (unknown directive, missing sibling,
/// missing uniqueness check) evaluates to `false`.
#[derive(Clone)]
pub struct RuleEvaluator {
    uniqueness: Option<Arc<dyn UniquenessCheck>>,
    exclusion_field: String,
}

impl std::fmt::Debug for RuleEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEvaluator")
            .field("uniqueness", &self.uniqueness.is_some())
            .field("exclusion_field", &self.exclusion_field)
            .finish()
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEvaluator {
    /// Evaluator with no uniqueness check and the default exclusion field
    pub fn new() -> Self {
        Self {
            uniqueness: None,
            exclusion_field: Settings::default().exclusion_field,
        }
    }

    pub fn with_uniqueness_check(mut self, check: Arc<dyn UniquenessCheck>) -> Self {
        self.uniqueness = Some(check);
        self
    }

    pub fn with_exclusion_field(mut self, field: impl Into<String>) -> Self {
        self.exclusion_field = field.into();
        self
    }

    /// Check `value` against `rule`. `siblings` is the level of the data tree
    /// the value belongs to.
    pub fn evaluate(&self, value: &str, rule: &RuleSpec, siblings: &DataTree) -> bool {
        match &rule.directive {
            Directive::Pattern(kind) => matches_pattern(*kind, value),
            Directive::Compare { field } => siblings
                .get(field)
                .and_then(|v| v.as_scalar())
                .map(|other| other == value)
                .unwrap_or(false),
            Directive::Unique { key } => self.check_unique(key, value, siblings),
            Directive::Dea => matches_pattern(PatternKind::Dea, value) && dea_checksum_matches(value),
            Directive::Unknown(token) => {
                tracing::debug!("Unknown rule {:?} fails closed", token);
                false
            }
        }
    }

    fn check_unique(&self, key: &str, value: &str, siblings: &DataTree) -> bool {
        let Some(check) = &self.uniqueness else {
            tracing::warn!(
                "UNIQUE|{} evaluated without a uniqueness check configured; failing",
                key
            );
            return false;
        };

        let exclude = siblings
            .get(&self.exclusion_field)
            .and_then(|v| v.as_scalar())
            .filter(|v| !v.is_empty());

        check.is_unique(key, value, exclude)
    }
}

fn matches_pattern(kind: PatternKind, value: &str) -> bool {
    match patterns::lookup(kind) {
        Some(pattern) => pattern.is_match(value),
        None => false,
    }
}

/// (d2 + d4 + d6 + 2 * (d3 + d5 + d7)) mod 10 must equal d8
fn dea_checksum_matches(value: &str) -> bool {
    let digits: Vec<u32> = value.chars().skip(2).filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 7 {
        return false;
    }

    let odd = digits[0] + digits[2] + digits[4];
    let even = digits[1] + digits[3] + digits[5];
    (odd + 2 * even) % 10 == digits[6]
}
