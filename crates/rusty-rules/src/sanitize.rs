// File: src/sanitize.rs
// Purpose: Scalar cleaning applied to every leaf before validation

use once_cell::sync::Lazy;
use regex::Regex;

// An `&` that already starts one of these is left alone
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});").unwrap()
});

/// Clean a raw request value.
///
/// Percent-decodes (`+` as space), drops control and non-ASCII characters,
/// trims, then HTML-encodes `& < > " '`. Existing entities are not encoded a
/// second time.
///
/// `+` and `%` survive encoding since numeric values use them, so a result
/// holding `+` or a `%XX` sequence decodes again on a second pass:
/// `"1%2B1"` gives `"1+1"`, which gives `"1 1"`. Other ASCII input is stable
/// under repeated application.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let decoded = urlencoding::decode_binary(raw.replace('+', " ").as_bytes()).into_owned();
    let decoded = String::from_utf8_lossy(&decoded);

    let stripped: String = decoded
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect();

    encode_entities(stripped.trim())
}

fn encode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for (i, c) in value.char_indices() {
        match c {
            '&' if ENTITY_REGEX.is_match(&value[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }

    out
}
