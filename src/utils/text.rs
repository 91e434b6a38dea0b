use serde_json::Value;

/// Borrow `value` as text when it is a string with visible content.
///
/// The returned slice is the original string, not the trimmed one; blank
/// and non-string values yield `None`.
pub fn non_blank(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.as_str()),
        _ => None,
    }
}

/// Like [`non_blank`] but for an optional map lookup.
pub fn non_blank_field<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(non_blank)
}

#[must_use]
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            let truncated = &s[..idx];
            format!("{}...", truncated.trim_end())
        }
        None => s.to_string(),
    }
}
