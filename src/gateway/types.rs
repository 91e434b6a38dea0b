use crate::assistant::{ChatOutcome, ChatRequest, DocumentSnapshot, EditOutcome, EditRequest};
use crate::ops::EditOp;
use crate::prompt::EditMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /edit` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBody {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub doc_json: Option<Value>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub recent_revision: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub base_hash: Option<String>,
    #[serde(default)]
    pub schema_hints: Option<String>,
}

impl From<EditBody> for EditRequest {
    fn from(body: EditBody) -> Self {
        Self {
            mode: EditMode::parse_lenient(body.mode.as_deref()),
            document: DocumentSnapshot {
                markdown: body.markdown,
                doc_json: body.doc_json,
                html: body.html,
            },
            recent_revision: body.recent_revision.unwrap_or_default(),
            instruction: body.instruction.unwrap_or_default(),
            base_hash: body.base_hash,
            schema_hints: body.schema_hints,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub summary: String,
    pub ack: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops: Option<Vec<EditOp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_hash: Option<String>,
}

impl From<EditOutcome> for EditResponse {
    fn from(outcome: EditOutcome) -> Self {
        Self {
            summary: outcome.summary,
            ack: outcome.ack,
            reply: outcome.reply,
            ops: outcome.ops,
            markdown: outcome.markdown,
            base_hash: outcome.base_hash,
        }
    }
}

/// `POST /chat` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    #[serde(default)]
    pub mode: Option<String>,
    pub message: String,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub doc_json: Option<Value>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub base_hash: Option<String>,
    #[serde(default)]
    pub schema_hints: Option<String>,
}

impl From<ChatBody> for ChatRequest {
    fn from(body: ChatBody) -> Self {
        Self {
            mode: EditMode::parse_lenient(body.mode.as_deref()),
            message: body.message,
            document: DocumentSnapshot {
                markdown: body.markdown,
                doc_json: body.doc_json,
                html: body.html,
            },
            session_id: body.session_id,
            base_hash: body.base_hash,
            schema_hints: body.schema_hints,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops: Option<Vec<EditOp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_hash: Option<String>,
    pub session_id: String,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            reply: outcome.reply,
            summary: outcome.summary,
            ops: outcome.ops,
            markdown: outcome.markdown,
            base_hash: outcome.base_hash,
            session_id: outcome.session_id,
        }
    }
}

/// Failure body shared by every route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}
