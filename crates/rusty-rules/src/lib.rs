// File: src/lib.rs
// Purpose: Main entry point for rusty-rules

//! # rusty-rules
//!
//! Rule-driven sanitizer and validator for nested request data.
//!
//! A [`RuleTable`] maps field names to an ordered list of rules loaded once
//! from a TOML file. The [`Validator`] walks a [`DataTree`], sanitizes every
//! scalar leaf and checks each field against its rules, returning the
//! sanitized tree together with an [`ErrorTree`] of the same shape.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_rules::{DataTree, ErrorNode, RuleTable, Validator};
//!
//! let rules = RuleTable::builder()
//!     .rule("email", "REQUIRED", "Email is required")
//!     .rule("email", "EMAIL", "Invalid email")
//!     .build();
//!
//! let validator = Validator::new(rules);
//!
//! let mut data = DataTree::new();
//! data.insert("email".to_string(), "not-an-email".into());
//!
//! let result = validator.process(&data).unwrap();
//! assert_eq!(
//!     result.errors.get("email"),
//!     Some(&ErrorNode::Message("Invalid email".to_string()))
//! );
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod form;
pub mod patterns;
pub mod rule;
pub mod sanitize;
pub mod table;
pub mod tree;
pub mod unique;
pub mod validator;

// Re-export main types
pub use config::{FieldRules, Settings, ValidationConfig};
pub use error::{Result, RulesError};
pub use evaluator::RuleEvaluator;
pub use form::parse_urlencoded;
pub use patterns::{NamedPattern, PatternKind};
pub use rule::{Directive, RuleSpec};
pub use sanitize::sanitize;
pub use table::{RuleTable, RuleTableBuilder};
pub use tree::{data_tree_from_json, DataTree, DataValue, ErrorNode, ErrorTree};
pub use unique::{AcceptAll, UniquenessCheck};
pub use validator::{Validated, Validator};
