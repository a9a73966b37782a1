// File: src/table.rs
// Purpose: Immutable field -> rules table

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::rule::{Directive, RuleSpec};
use indexmap::IndexMap;
use std::path::Path;

/// Ordered rules for every validated field
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    fields: IndexMap<String, Vec<RuleSpec>>,
}

impl RuleTable {
    /// Build from a parsed rule file
    pub fn from_config(config: &ValidationConfig) -> Self {
        let mut fields = IndexMap::with_capacity(config.rules.len());

        for (field, rules) in &config.rules {
            let specs: Vec<RuleSpec> = rules
                .validation_rules
                .iter()
                .zip(&rules.validation_errors)
                .map(|(token, message)| RuleSpec::parse(token, message.as_str()))
                .collect();

            for spec in specs.iter().filter(|s| s.directive.is_unknown()) {
                tracing::warn!(
                    "Field `{}` uses unknown rule {}; it will always fail",
                    field,
                    spec.directive
                );
            }

            fields.insert(field.clone(), specs);
        }

        Self { fields }
    }

    /// Load and build from a rule file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = ValidationConfig::load(path)?;
        Ok(Self::from_config(&config))
    }

    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// Rules for a field, in declared order
    pub fn get(&self, field: &str) -> Option<&[RuleSpec]> {
        self.fields.get(field).map(|rules| rules.as_slice())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleSpec])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }
}

/// Programmatic table construction
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    fields: IndexMap<String, Vec<RuleSpec>>,
}

impl RuleTableBuilder {
    /// Append a rule token to a field's list
    pub fn rule(self, field: &str, token: &str, message: &str) -> Self {
        self.spec(field, RuleSpec::parse(token, message))
    }

    /// Append a typed directive to a field's list
    pub fn directive(self, field: &str, directive: Directive, message: &str) -> Self {
        self.spec(field, RuleSpec::new(directive, message))
    }

    fn spec(mut self, field: &str, spec: RuleSpec) -> Self {
        self.fields.entry(field.to_string()).or_default().push(spec);
        self
    }

    pub fn build(self) -> RuleTable {
        RuleTable {
            fields: self.fields,
        }
    }
}
