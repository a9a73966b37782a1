// File: src/rule.rs
// Purpose: Rule directives parsed from `directive` / `directive|argument` tokens

use crate::patterns::PatternKind;
use std::fmt;

const ARGUMENT_DELIMITER: char = '|';

/// What a single rule checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Full match against a named pattern
    Pattern(PatternKind),

    /// Exact equality with a sibling field at the same level
    Compare { field: String },

    /// Delegated to the configured [`UniquenessCheck`](crate::UniquenessCheck)
    Unique { key: String },

    /// DEA registration number: pattern plus checksum digit
    Dea,

    /// Unrecognised or incomplete token. Always fails.
    Unknown(String),
}

impl Directive {
    /// Parse a rule token such as `EMAIL` or `COMPARE|password`.
    ///
    /// Never fails: anything that cannot be understood becomes
    /// [`Directive::Unknown`].
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        let (name, argument) = match token.split_once(ARGUMENT_DELIMITER) {
            Some((name, argument)) => (name.trim(), Some(argument.trim())),
            None => (token, None),
        };
        let argument = argument.filter(|a| !a.is_empty());

        match (name.to_ascii_uppercase().as_str(), argument) {
            ("COMPARE", Some(field)) => Directive::Compare {
                field: field.to_string(),
            },
            ("UNIQUE", Some(key)) => Directive::Unique {
                key: key.to_string(),
            },
            ("COMPARE", None) | ("UNIQUE", None) => Directive::Unknown(token.to_string()),
            ("DEA", _) => Directive::Dea,
            _ => match PatternKind::from_name(name) {
                Some(kind) => Directive::Pattern(kind),
                None => Directive::Unknown(token.to_string()),
            },
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Directive::Pattern(PatternKind::Required))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Directive::Unknown(_))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Pattern(kind) => write!(f, "{}", kind),
            Directive::Compare { field } => write!(f, "COMPARE{}{}", ARGUMENT_DELIMITER, field),
            Directive::Unique { key } => write!(f, "UNIQUE{}{}", ARGUMENT_DELIMITER, key),
            Directive::Dea => f.write_str("DEA"),
            Directive::Unknown(token) => f.write_str(token),
        }
    }
}

/// One rule of a field: the check and the message reported when it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub directive: Directive,
    pub message: String,
}

impl RuleSpec {
    pub fn new(directive: Directive, message: impl Into<String>) -> Self {
        Self {
            directive,
            message: message.into(),
        }
    }

    /// Parse a rule token and pair it with its error message
    pub fn parse(token: &str, message: impl Into<String>) -> Self {
        Self::new(Directive::parse(token), message)
    }
}
