// File: src/tree.rs
// Purpose: Nested request data and the error tree mirroring it

use crate::error::{Result, RulesError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Submitted data: field name -> value, in submission order
pub type DataTree = IndexMap<String, DataValue>;

/// Validation failures: field name -> message or nested failures
pub type ErrorTree = IndexMap<String, ErrorNode>;

/// A submitted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Scalar(String),
    Tree(DataTree),
}

impl DataValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            DataValue::Scalar(s) => Some(s),
            DataValue::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&DataTree> {
        match self {
            DataValue::Tree(tree) => Some(tree),
            DataValue::Scalar(_) => None,
        }
    }

    /// Convert a JSON value.
    ///
    /// Numbers and booleans become their text form, `null` an empty string,
    /// and arrays trees keyed by index.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => DataValue::Scalar(s),
            JsonValue::Null => DataValue::Scalar(String::new()),
            JsonValue::Bool(b) => DataValue::Scalar(b.to_string()),
            JsonValue::Number(n) => DataValue::Scalar(n.to_string()),
            JsonValue::Array(items) => DataValue::Tree(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), DataValue::from_json(item)))
                    .collect(),
            ),
            JsonValue::Object(map) => DataValue::Tree(
                map.into_iter()
                    .map(|(k, v)| (k, DataValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Scalar(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Scalar(s)
    }
}

impl From<DataTree> for DataValue {
    fn from(tree: DataTree) -> Self {
        DataValue::Tree(tree)
    }
}

/// Build a data tree from a JSON payload. The root must be an object.
pub fn data_tree_from_json(value: JsonValue) -> Result<DataTree> {
    match value {
        JsonValue::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, DataValue::from_json(v)))
            .collect()),
        _ => Err(RulesError::InvalidPayload(
            "expected a JSON object at the top level".to_string(),
        )),
    }
}

/// A failure report for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorNode {
    Message(String),
    Tree(ErrorTree),
}

impl ErrorNode {
    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorNode::Message(m) => Some(m),
            ErrorNode::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&ErrorTree> {
        match self {
            ErrorNode::Tree(tree) => Some(tree),
            ErrorNode::Message(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_object_to_tree() {
        let json = serde_json::json!({
            "name": "Alice",
            "age": 30,
            "active": true,
            "nickname": null,
            "address": { "zip": "12345" },
            "tags": ["a", "b"]
        });

        let tree = data_tree_from_json(json).unwrap();

        let expected: DataTree = indexmap! {
            "name".to_string() => "Alice".into(),
            "age".to_string() => "30".into(),
            "active".to_string() => "true".into(),
            "nickname".to_string() => "".into(),
            "address".to_string() => DataValue::Tree(indexmap! {
                "zip".to_string() => "12345".into(),
            }),
            "tags".to_string() => DataValue::Tree(indexmap! {
                "0".to_string() => "a".into(),
                "1".to_string() => "b".into(),
            }),
        };
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_json_non_object_root_rejected() {
        assert!(data_tree_from_json(serde_json::json!("text")).is_err());
        assert!(data_tree_from_json(serde_json::json!(["a"])).is_err());
        assert!(data_tree_from_json(serde_json::json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_serde_untagged_shapes() {
        let tree: DataTree =
            serde_json::from_str(r#"{"email":"a@b.com","address":{"zip":"00000"}}"#).unwrap();
        assert_eq!(tree["email"].as_scalar(), Some("a@b.com"));
        assert_eq!(
            tree["address"].as_tree().and_then(|t| t["zip"].as_scalar()),
            Some("00000")
        );

        let errors: ErrorTree = indexmap! {
            "address".to_string() => ErrorNode::Tree(indexmap! {
                "zip".to_string() => ErrorNode::Message("Invalid zip".to_string()),
            }),
        };
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"address":{"zip":"Invalid zip"}}"#
        );
    }
}
