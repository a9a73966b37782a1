// File: src/form.rs
// Purpose: Decode urlencoded form bodies with bracket keys into a DataTree

use crate::error::{Result, RulesError};
use crate::tree::{DataTree, DataValue};
use std::collections::HashMap;

/// Parse an `application/x-www-form-urlencoded` body.
///
/// Bracketed keys nest: `address[zip]=02134` becomes
/// `{ "address": { "zip": "02134" } }` and `tags[]=a&tags[]=b` becomes
/// `{ "tags": { "0": "a", "1": "b" } }`. Keys are decoded; values are kept
/// as submitted since the validator's sanitizer decodes them. A repeated key
/// replaces the earlier value.
///
/// A key nesting deeper than `max_depth` levels (the top level is 1) fails
/// the whole body with [`RulesError::DepthExceeded`] before anything is built
/// for it.
pub fn parse_urlencoded(body: &str, max_depth: usize) -> Result<DataTree> {
    let mut tree = DataTree::new();
    let mut appends = AppendIndex::default();

    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_key(raw_key);
        if key.is_empty() {
            continue;
        }

        let segments = split_key(&key);
        if segments.len() > max_depth {
            return Err(RulesError::DepthExceeded {
                path: bracket_path(&segments[..max_depth]),
                max_depth,
            });
        }
        insert(&mut tree, &mut appends, &segments, value.to_string());
    }

    Ok(tree)
}

fn decode_key(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(key) => key.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}

/// `a[b][]` -> ["a", "b", ""]. Keys without a complete bracket pair stay whole.
fn split_key(key: &str) -> Vec<String> {
    let open = match key.find('[') {
        Some(open) if open > 0 => open,
        _ => return vec![key.to_string()],
    };

    let mut segments = vec![key[..open].to_string()];
    let mut rest = &key[open..];

    while let Some(inner) = rest.strip_prefix('[') {
        match inner.find(']') {
            Some(close) => {
                segments.push(inner[..close].to_string());
                rest = &inner[close + 1..];
            }
            None => break,
        }
    }

    if segments.len() == 1 {
        return vec![key.to_string()];
    }
    segments
}

fn bracket_path(segments: &[String]) -> String {
    let mut segments = segments.iter();
    let mut path = segments.next().cloned().unwrap_or_default();
    for segment in segments {
        path.push('[');
        path.push_str(segment);
        path.push(']');
    }
    path
}

/// Next `[]` index of each tree built so far, mirroring the tree's shape.
#[derive(Debug, Default)]
struct AppendIndex {
    next: usize,
    children: HashMap<String, AppendIndex>,
}

impl AppendIndex {
    /// Key for `segment` at this level. An empty segment appends; a numeric
    /// one moves the next append past it.
    fn resolve(&mut self, segment: &str) -> String {
        if segment.is_empty() {
            let key = self.next;
            self.next += 1;
            return key.to_string();
        }
        if let Ok(index) = segment.parse::<usize>() {
            self.next = self.next.max(index.saturating_add(1));
        }
        segment.to_string()
    }
}

fn insert(tree: &mut DataTree, appends: &mut AppendIndex, segments: &[String], value: String) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut level = tree;
    let mut index = appends;

    for segment in parents {
        let key = index.resolve(segment);
        let entry = level
            .entry(key.clone())
            .or_insert_with(|| DataValue::Tree(DataTree::new()));
        if let DataValue::Scalar(_) = entry {
            *entry = DataValue::Tree(DataTree::new());
            index.children.remove(&key);
        }

        index = index.children.entry(key).or_default();
        level = match entry {
            DataValue::Tree(child) => child,
            DataValue::Scalar(_) => return,
        };
    }

    let key = index.resolve(last);
    index.children.remove(&key);
    level.insert(key, DataValue::Scalar(value));
}
