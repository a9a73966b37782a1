// File: src/validator.rs
// Purpose: Recursive sanitize-and-validate walk over a data tree

use crate::config::{Settings, ValidationConfig};
use crate::error::{Result, RulesError};
use crate::evaluator::RuleEvaluator;
use crate::sanitize::sanitize;
use crate::table::RuleTable;
use crate::tree::{DataTree, DataValue, ErrorNode, ErrorTree};
use crate::unique::UniquenessCheck;
use std::path::Path;
use std::sync::Arc;

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// Input with every scalar leaf sanitized
    pub data: DataTree,

    /// Failures, shaped like `data`; empty when everything passed
    pub errors: ErrorTree,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Top-level failure for a field
    pub fn error(&self, field: &str) -> Option<&ErrorNode> {
        self.errors.get(field)
    }
}

/// Sanitizes and validates nested request data against a [`RuleTable`].
///
/// The table is shared behind an `Arc`, so a validator is cheap to clone and
/// can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Arc<RuleTable>,
    evaluator: RuleEvaluator,
    max_depth: usize,
}

impl Validator {
    /// Validator with the default [`Settings`]
    pub fn new(rules: RuleTable) -> Self {
        Self::with_settings(rules, &Settings::default())
    }

    pub fn with_settings(rules: RuleTable, settings: &Settings) -> Self {
        Self {
            rules: Arc::new(rules),
            evaluator: RuleEvaluator::new().with_exclusion_field(settings.exclusion_field.clone()),
            max_depth: settings.max_depth,
        }
    }

    /// Build from a parsed rule file, applying its settings
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::with_settings(RuleTable::from_config(config), &config.settings)
    }

    /// Load a rule file. Fails if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = ValidationConfig::load(path)?;
        Ok(Self::from_config(&config))
    }

    /// Wire in the collaborator behind `UNIQUE` rules
    pub fn with_uniqueness_check(mut self, check: Arc<dyn UniquenessCheck>) -> Self {
        self.evaluator = self.evaluator.with_uniqueness_check(check);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate a sanitized copy of `data`.
    ///
    /// The copy is built level by level behind the depth check, so an
    /// over-deep input is rejected without ever being cloned.
    pub fn process(&self, data: &DataTree) -> Result<Validated> {
        let (data, errors) = self.walk(data, "", 1)?;
        Ok(Validated { data, errors })
    }

    /// Sanitize `data` in place and return its failures. On error `data` is
    /// left as it was.
    pub fn process_in_place(&self, data: &mut DataTree) -> Result<ErrorTree> {
        let (sanitized, errors) = self.walk(data, "", 1)?;
        *data = sanitized;
        Ok(errors)
    }

    fn walk(&self, level: &DataTree, path: &str, depth: usize) -> Result<(DataTree, ErrorTree)> {
        if depth > self.max_depth {
            return Err(RulesError::DepthExceeded {
                path: path.to_string(),
                max_depth: self.max_depth,
            });
        }

        // Sanitize the whole level first so COMPARE sees clean siblings
        // regardless of field order. Child trees are filled in below.
        let mut clean: DataTree = level
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    DataValue::Scalar(raw) => DataValue::Scalar(sanitize(raw)),
                    DataValue::Tree(_) => DataValue::Tree(DataTree::new()),
                };
                (key.clone(), value)
            })
            .collect();

        let mut errors = ErrorTree::new();

        for (index, (key, value)) in level.iter().enumerate() {
            match value {
                DataValue::Tree(child) => {
                    let child_path = join_path(path, key);
                    let (child_data, child_errors) = self.walk(child, &child_path, depth + 1)?;
                    if let Some((_, slot)) = clean.get_index_mut(index) {
                        *slot = DataValue::Tree(child_data);
                    }
                    if !child_errors.is_empty() {
                        errors.insert(key.clone(), ErrorNode::Tree(child_errors));
                    }
                }
                DataValue::Scalar(_) => {
                    if let Some((_, DataValue::Scalar(value))) = clean.get_index(index) {
                        if let Some(message) = self.check_field(key, value, &clean) {
                            errors.insert(key.clone(), ErrorNode::Message(message));
                        }
                    }
                }
            }
        }

        Ok((clean, errors))
    }

    /// First failing rule's message, if any
    fn check_field(&self, field: &str, value: &str, siblings: &DataTree) -> Option<String> {
        let rules = self.rules.get(field)?;

        if value.is_empty() && !rules.iter().any(|rule| rule.directive.is_required()) {
            tracing::trace!("Skipping empty optional field `{}`", field);
            return None;
        }

        rules
            .iter()
            .find(|rule| !self.evaluator.evaluate(value, rule, siblings))
            .map(|rule| {
                tracing::debug!("Field `{}` failed {}", field, rule.directive);
                rule.message.clone()
            })
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}[{}]", parent, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;
    use pretty_assertions::assert_eq;

    fn nested(depth: usize) -> DataTree {
        let mut tree: DataTree = indexmap! { "leaf".to_string() => DataValue::from("x") };
        for _ in 1..depth {
            tree = indexmap! { "child".to_string() => DataValue::Tree(tree) };
        }
        tree
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "address"), "address");
        assert_eq!(join_path("address", "zip"), "address[zip]");
    }

    #[test]
    fn test_depth_limit() {
        let validator = Validator::new(RuleTable::default()).with_max_depth(3);

        assert!(validator.process(&nested(3)).is_ok());

        let err = validator.process(&nested(4)).unwrap_err();
        match err {
            RulesError::DepthExceeded { path, max_depth } => {
                assert_eq!(max_depth, 3);
                assert_eq!(path, "child[child][child]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Deep chain built without recursion; release it with `dismantle`.
    fn chain(depth: usize) -> DataTree {
        let mut tree = DataTree::new();
        for _ in 0..depth {
            tree = indexmap! { "child".to_string() => DataValue::Tree(tree) };
        }
        tree
    }

    fn dismantle(mut tree: DataTree) {
        while let Some((_, value)) = tree.pop() {
            if let DataValue::Tree(child) = value {
                tree = child;
            }
        }
    }

    #[test]
    fn test_very_deep_tree_is_rejected_without_recursing() {
        let validator = Validator::new(RuleTable::default());
        let mut data = chain(100_000);

        let err = validator.process(&data).unwrap_err();
        assert!(matches!(err, RulesError::DepthExceeded { max_depth: 32, .. }));

        let err = validator.process_in_place(&mut data).unwrap_err();
        assert!(matches!(err, RulesError::DepthExceeded { .. }));

        dismantle(data);
    }

    #[test]
    fn test_defaults_come_from_settings() {
        let validator = Validator::new(RuleTable::default());
        assert_eq!(validator.max_depth(), Settings::default().max_depth);
    }

    #[test]
    fn test_in_place_error_leaves_tree_alone() {
        let validator = Validator::new(RuleTable::default()).with_max_depth(2);
        let mut data = nested(3);
        let before = data.clone();

        assert!(validator.process_in_place(&mut data).is_err());
        assert_eq!(data, before);
    }

    #[test]
    fn test_in_place_sanitizes_caller_tree() {
        let validator = Validator::new(RuleTable::default());
        let mut data: DataTree = indexmap! {
            "name".to_string() => DataValue::from("  Tom%20%26%20Jerry "),
            "address".to_string() => DataValue::Tree(indexmap! {
                "street".to_string() => DataValue::from("<b>Main</b>"),
            }),
        };

        let errors = validator.process_in_place(&mut data).unwrap();

        assert!(errors.is_empty());
        assert_eq!(data["name"], DataValue::from("Tom &amp; Jerry"));
        assert_eq!(
            data["address"].as_tree().unwrap()["street"],
            DataValue::from("&lt;b&gt;Main&lt;/b&gt;")
        );
    }

    #[test]
    fn test_process_leaves_input_untouched() {
        let validator = Validator::new(RuleTable::default());
        let data: DataTree = indexmap! { "name".to_string() => DataValue::from(" padded ") };

        let result = validator.process(&data).unwrap();

        assert_eq!(data["name"], DataValue::from(" padded "));
        assert_eq!(result.data["name"], DataValue::from("padded"));
        assert!(result.is_valid());
    }
}
