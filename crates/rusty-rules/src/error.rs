// File: src/error.rs
// Purpose: Error type for rule loading and tree validation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a validator or walking a data tree.
///
/// Individual field failures are never reported through this type; they end up
/// in the [`ErrorTree`](crate::ErrorTree) returned by the validator.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rule file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("field `{field}` declares {rules} rules but {messages} error messages")]
    MismatchedMessages {
        field: String,
        rules: usize,
        messages: usize,
    },

    #[error("data nested deeper than {max_depth} levels at `{path}`")]
    DepthExceeded { path: String, max_depth: usize },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

pub type Result<T> = std::result::Result<T, RulesError>;
