use serde::{Deserialize, Serialize};

/// One op exactly as the agent produced it, before validation.
pub type RawOp = serde_json::Map<String, serde_json::Value>;

/// Heading level assumed when a heading-targeted op omits one.
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// Discriminator values accepted in an op's `"op"` field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum OpKind {
    AppendMarkdown,
    ReplaceSectionByHeading,
    InsertAfterHeading,
}

impl OpKind {
    /// Whether ops of this kind must name a target heading.
    pub fn targets_heading(self) -> bool {
        !matches!(self, Self::AppendMarkdown)
    }
}

/// A validated document mutation, ready for an external applier.
///
/// Serializes with the `"op"` tag so the wire shape matches what the agent
/// was asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    AppendMarkdown {
        markdown: String,
    },
    ReplaceSectionByHeading {
        heading: String,
        level: u8,
        markdown: String,
    },
    InsertAfterHeading {
        heading: String,
        level: u8,
        markdown: String,
    },
}

impl EditOp {
    pub fn kind(&self) -> OpKind {
        match self {
            Self::AppendMarkdown { .. } => OpKind::AppendMarkdown,
            Self::ReplaceSectionByHeading { .. } => OpKind::ReplaceSectionByHeading,
            Self::InsertAfterHeading { .. } => OpKind::InsertAfterHeading,
        }
    }

    pub fn markdown(&self) -> &str {
        match self {
            Self::AppendMarkdown { markdown }
            | Self::ReplaceSectionByHeading { markdown, .. }
            | Self::InsertAfterHeading { markdown, .. } => markdown,
        }
    }

    pub fn heading(&self) -> Option<&str> {
        match self {
            Self::AppendMarkdown { .. } => None,
            Self::ReplaceSectionByHeading { heading, .. }
            | Self::InsertAfterHeading { heading, .. } => Some(heading),
        }
    }
}
