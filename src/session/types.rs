use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One compact entry of a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    /// Read a loosely typed `{role, content}` entry.
    ///
    /// Both fields must be strings and the role must be `user` or
    /// `assistant`; extra keys are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let role = match value.get("role")?.as_str()? {
            "user" => ChatRole::User,
            "assistant" => ChatRole::Assistant,
            _ => return None,
        };
        let content = value.get("content")?.as_str()?.to_string();
        Some(Self { role, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_accepts_compact_entries() {
        let turn = ChatTurn::from_value(&json!({"role": "user", "content": "hi", "id": 4}));
        assert_eq!(turn, Some(ChatTurn::user("hi")));
    }

    #[test]
    fn from_value_rejects_mistyped_entries() {
        for value in [
            json!({"role": "user"}),
            json!({"content": "hi"}),
            json!({"role": 1, "content": "hi"}),
            json!({"role": "assistant", "content": ["hi"]}),
            json!({"role": "tool", "content": "hi"}),
            json!("user: hi"),
        ] {
            assert!(ChatTurn::from_value(&value).is_none(), "{value}");
        }
    }

    #[test]
    fn serializes_lowercase_role() {
        let value = serde_json::to_value(ChatTurn::assistant("Okay.")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "Okay."}));
    }
}
