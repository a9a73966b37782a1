// File: src/config.rs
// Purpose: Rule file parsing (validation.toml)

use crate::error::{Result, RulesError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of a rule file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    #[serde(default)]
    pub settings: Settings,

    /// Per-field rules, keyed by field name, in file order
    #[serde(default)]
    pub rules: IndexMap<String, FieldRules>,
}

/// Validator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Deepest nesting accepted before the walk is aborted
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Sibling field passed to the uniqueness check as the record to exclude
    /// (e.g. the id of the account being edited)
    #[serde(default = "default_exclusion_field")]
    pub exclusion_field: String,
}

/// Rules for a single field.
///
/// `validation_rules[i]` fails with `validation_errors[i]`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FieldRules {
    #[serde(default)]
    pub validation_rules: Vec<String>,

    #[serde(default)]
    pub validation_errors: Vec<String>,
}

fn default_max_depth() -> usize {
    32
}

fn default_exclusion_field() -> String {
    "user_id".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            exclusion_field: default_exclusion_field(),
        }
    }
}

impl ValidationConfig {
    /// Load a rule file.
    ///
    /// Unlike application config, a missing rule file is an error: nothing
    /// can be validated without rules.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;

        tracing::debug!(
            "Loaded {} field rule sets from {:?}",
            config.rules.len(),
            path
        );

        Ok(config)
    }

    /// Parse rule file contents
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ValidationConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Every rule needs a message to report
    fn check(&self) -> Result<()> {
        for (field, rules) in &self.rules {
            if rules.validation_rules.len() != rules.validation_errors.len() {
                return Err(RulesError::MismatchedMessages {
                    field: field.clone(),
                    rules: rules.validation_rules.len(),
                    messages: rules.validation_errors.len(),
                });
            }
        }
        Ok(())
    }
}
