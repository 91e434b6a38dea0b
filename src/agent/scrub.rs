use crate::utils::truncate_with_ellipsis;
use std::borrow::Cow;

const MAX_AGENT_ERROR_CHARS: usize = 200;

const REDACTED: &str = "[REDACTED]";

/// Key prefixes whose tail is the secret itself. Only matched at the start
/// of a word.
const PREFIX_PATTERNS: [&str; 2] = ["sk-", "sess-"];

/// Markers followed by a secret value.
const MARKER_PATTERNS: [&str; 7] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "\"authorization\":\"Bearer ",
    "Bearer ",
    "api_key=",
    "\"api_key\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

/// End of the secret starting at `from`; sentence punctuation is not part
/// of it.
fn token_end(input: &str, from: usize) -> usize {
    let end = input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i);
    from + input[from..end].trim_end_matches(['.', ':']).len()
}

fn starts_word(input: &str, at: usize) -> bool {
    input[..at]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_ascii_alphanumeric())
}

fn redact_after(scrubbed: &mut String, marker: &str, whole_word: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let value_start = start + marker.len();
        let end = token_end(scrubbed, value_start);

        // A bare marker with nothing after it is left alone.
        if end == value_start || (whole_word && !starts_word(scrubbed, start)) {
            search_from = value_start;
            continue;
        }

        scrubbed.replace_range(start..end, REDACTED);
        search_from = start + REDACTED.len();
    }
}

/// Redact API keys and bearer tokens from runtime error text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needs_scrubbing = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern));
    if !needs_scrubbing {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        redact_after(&mut scrubbed, marker, false);
    }
    for prefix in PREFIX_PATTERNS {
        redact_after(&mut scrubbed, prefix, true);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and cap the length of an error before it is logged or
/// returned to a caller.
pub fn sanitize_agent_error(input: &str) -> String {
    truncate_with_ellipsis(&scrub_secret_patterns(input), MAX_AGENT_ERROR_CHARS)
}

/// Build a sanitized error from a failed HTTP response.
pub async fn api_error(runtime: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    anyhow::anyhow!("{runtime} API error ({status}): {}", sanitize_agent_error(&body))
}
