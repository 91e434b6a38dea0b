use serde::{Deserialize, Serialize};

/// Which HTTP operation a prompt or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestKind {
    Edit,
    Chat,
}

/// Document representation the caller edits through.
///
/// `A` edits by structural ops against Markdown, `B` by full Markdown
/// replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum EditMode {
    #[default]
    A,
    B,
}

impl EditMode {
    /// Case-insensitive; anything that is not `b` means mode A.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("b") => Self::B,
            _ => Self::A,
        }
    }
}

/// Which snapshot of the document was placed in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentFormat {
    Markdown,
    DocJson,
    Html,
    /// Nothing was supplied.
    Empty,
}
