use anyhow::{Context, Result};
use colored::Colorize;
use rusty_rules::{data_tree_from_json, parse_urlencoded, DataTree, ErrorNode, ErrorTree, Validator};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Returns whether the payload passed validation
pub fn execute(rules: &Path, data: Option<&Path>, form: bool, json: bool) -> Result<bool> {
    let validator = Validator::load(rules)
        .with_context(|| format!("Failed to load rule file: {:?}", rules))?;

    let payload = read_payload(data)?;
    let tree = parse_payload(&payload, form, validator.max_depth())?;
    tracing::debug!(
        "Validating {} top-level fields against {} rule sets",
        tree.len(),
        validator.rules().len()
    );

    let result = validator
        .process(&tree)
        .context("Failed to validate payload")?;

    if json {
        let report = serde_json::json!({
            "valid": result.is_valid(),
            "data": result.data,
            "errors": result.errors,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if result.is_valid() {
        println!("{}", "✓ Payload is valid".green().bold());
    } else {
        println!("{}", "✗ Validation failed".red().bold());
        println!();
        print_errors(&result.errors, "");
    }

    Ok(result.is_valid())
}

fn read_payload(data: Option<&Path>) -> Result<String> {
    match data {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload: {:?}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            Ok(buffer)
        }
    }
}

fn parse_payload(payload: &str, form: bool, max_depth: usize) -> Result<DataTree> {
    if form {
        return parse_urlencoded(payload.trim(), max_depth).context("Failed to decode form body");
    }

    let value: serde_json::Value =
        serde_json::from_str(payload).context("Payload is not valid JSON")?;
    Ok(data_tree_from_json(value)?)
}

fn print_errors(errors: &ErrorTree, parent: &str) {
    for (field, node) in errors {
        let path = if parent.is_empty() {
            field.clone()
        } else {
            format!("{}[{}]", parent, field)
        };

        match node {
            ErrorNode::Message(message) => println!("  {}: {}", path.yellow(), message),
            ErrorNode::Tree(children) => print_errors(children, &path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_payload() {
        let tree = parse_payload(r#"{"email": "a@b.com", "age": 30}"#, false, 32).unwrap();
        assert_eq!(tree["age"].as_scalar(), Some("30"));
    }

    #[test]
    fn test_parse_form_payload() {
        let tree = parse_payload("address[zip]=02134\n", true, 32).unwrap();
        assert_eq!(
            tree["address"].as_tree().and_then(|t| t["zip"].as_scalar()),
            Some("02134")
        );
    }

    #[test]
    fn test_reject_non_object_json() {
        assert!(parse_payload("[1, 2]", false, 32).is_err());
        assert!(parse_payload("not json", false, 32).is_err());
    }

    #[test]
    fn test_reject_over_deep_form_payload() {
        assert!(parse_payload("a[b][c]=1", true, 2).is_err());
    }
}
