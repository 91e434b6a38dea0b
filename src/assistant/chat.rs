use super::Assistant;
use super::content::{DocumentSnapshot, select_content};
use crate::agent::AgentInput;
use crate::error::AssistantError;
use crate::ops::{EditOp, validate_ops};
use crate::payload::normalize;
use crate::prompt::{EditMode, PromptParams, RequestKind};
use crate::session::{ChatTurn, DEFAULT_SESSION_ID};

/// Canned reply when the agent edited but said nothing.
pub const REPLY_APPLIED: &str = "Applied the edit.";
/// Canned reply for a silent, edit-free turn.
pub const REPLY_OKAY: &str = "Okay.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub mode: EditMode,
    pub message: String,
    pub document: DocumentSnapshot,
    pub session_id: Option<String>,
    pub base_hash: Option<String>,
    pub schema_hints: Option<String>,
}

impl ChatRequest {
    /// The session this turn belongs to; blank ids share the default one.
    pub fn resolved_session_id(&self) -> &str {
        self.session_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(DEFAULT_SESSION_ID)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub reply: String,
    pub summary: Option<String>,
    pub ops: Option<Vec<EditOp>>,
    pub markdown: Option<String>,
    pub base_hash: Option<String>,
    pub session_id: String,
}

impl Assistant {
    /// One conversational turn.
    ///
    /// The session lock is held across the agent call so concurrent turns
    /// on one session apply strictly one after another. History is only
    /// written once the whole turn has been accepted.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatOutcome, AssistantError> {
        let mode = request.mode;
        let (content, content_format) = select_content(mode, &request.document);

        let mut session = self.sessions.lock(request.resolved_session_id()).await;
        tracing::info!(
            %mode,
            %content_format,
            content_len = content.len(),
            session_id = session.session_id(),
            history = session.history().len(),
            "chat request"
        );

        let prompt = self.render_prompt(&PromptParams {
            content: &content,
            content_format,
            base_hash: request.base_hash.as_deref(),
            schema_hints: request.schema_hints.as_deref(),
            message: &request.message,
            ..PromptParams::new(RequestKind::Chat, mode)
        })?;
        let input = AgentInput::Conversation {
            history: session.history().to_vec(),
            prompt,
        };

        let raw = self.call_agent(RequestKind::Chat, input).await?;
        let payload = normalize(&raw);

        let (ops, markdown) = match mode {
            EditMode::A => (payload.ops.as_deref().map(validate_ops).transpose()?, None),
            EditMode::B => (None, payload.markdown.clone()),
        };

        let reply = match payload.reply.as_str() {
            "" if ops.is_some() || markdown.is_some() => REPLY_APPLIED.to_string(),
            "" => REPLY_OKAY.to_string(),
            reply => reply.to_string(),
        };

        session.record([
            ChatTurn::user(request.message.clone()),
            ChatTurn::assistant(reply.clone()),
        ]);

        Ok(ChatOutcome {
            reply,
            summary: Some(payload.summary).filter(|summary| !summary.is_empty()),
            ops,
            markdown,
            base_hash: payload.base_hash.or_else(|| request.base_hash.clone()),
            session_id: session.session_id().to_string(),
        })
    }
}
