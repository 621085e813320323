//! Denylist-based scrubbing of untrusted strings.
//!
//! This is not an HTML parser. Each string leaf goes through an ordered list of
//! pattern removals and is trimmed; the list is re-applied until the string no
//! longer changes, so removing one match can never leave a new one behind.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Ordered removal list. Complete element pairs go first so their inner
/// content disappears with them; stray tags and attributes follow.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // <script ...>...</script>
        r"(?is)<script\b[^>]*>.*?</script\s*>",
        // <iframe>, <object>, <embed>, <applet> with content
        r"(?is)<(?:iframe|object|embed|applet)\b[^>]*>.*?</(?:iframe|object|embed|applet)\s*>",
        // unmatched opening, closing or self-closing tags of the same families
        r"(?i)</?(?:script|iframe|object|embed|applet)\b[^>]*>",
        // <img ... onerror=...>
        r"(?i)<img\b[^>]*\bonerror\b[^>]*>",
        // javascript: scheme, tolerating whitespace before the colon
        r"(?i)javascript\s*:",
        // inline event handlers inside a tag: onclick="...", onload='...', onmouseover=x
        r#"(?i)(<[a-z][^>]*?)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*)"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("sanitizer pattern must compile"))
    .collect()
});

/// Sanitize a single string.
pub fn sanitize_str(input: &str) -> String {
    let mut current = input.to_string();

    // A pass either leaves the string alone or makes it strictly shorter.
    loop {
        let mut next = current.clone();
        for pattern in PATTERNS.iter() {
            next = pattern.replace_all(&next, "${1}").into_owned();
        }
        let next = next.trim().to_string();

        if next == current {
            return current;
        }
        current = next;
    }
}

/// Recursively sanitize every string inside `value`.
///
/// Object keys, numbers, booleans and nulls are left alone.
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_str(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, sanitize(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Like [`sanitize`], but top-level object fields listed in `raw_fields`
/// pass through untouched (credentials are compared, never rendered).
pub fn sanitize_except(value: Value, raw_fields: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    if raw_fields.contains(&key.as_str()) {
                        (key, value)
                    } else {
                        (key, sanitize(value))
                    }
                })
                .collect(),
        ),
        other => sanitize(other),
    }
}
