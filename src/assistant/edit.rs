use super::Assistant;
use super::content::{DocumentSnapshot, select_content};
use crate::agent::AgentInput;
use crate::error::AssistantError;
use crate::ops::{EditOp, validate_ops};
use crate::payload::normalize;
use crate::prompt::{EditMode, PromptParams, RequestKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRequest {
    pub mode: EditMode,
    pub document: DocumentSnapshot,
    pub recent_revision: String,
    pub instruction: String,
    pub base_hash: Option<String>,
    pub schema_hints: Option<String>,
}

/// Accepted single-shot edit. Exactly one of `ops` (mode A) or `markdown`
/// (mode B) is set.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub summary: String,
    pub ack: String,
    pub reply: Option<String>,
    pub ops: Option<Vec<EditOp>>,
    pub markdown: Option<String>,
    pub base_hash: Option<String>,
}

impl Assistant {
    pub async fn edit(&self, request: &EditRequest) -> Result<EditOutcome, AssistantError> {
        let mode = request.mode;
        let (content, content_format) = select_content(mode, &request.document);
        tracing::info!(
            %mode,
            %content_format,
            content_len = content.len(),
            "edit request"
        );

        let prompt = self.render_prompt(&PromptParams {
            content: &content,
            content_format,
            base_hash: request.base_hash.as_deref(),
            schema_hints: request.schema_hints.as_deref(),
            recent_revision: &request.recent_revision,
            instruction: &request.instruction,
            ..PromptParams::new(RequestKind::Edit, mode)
        })?;

        let raw = self
            .call_agent(RequestKind::Edit, AgentInput::Prompt(prompt))
            .await?;
        let payload = normalize(&raw);

        let (ops, markdown) = match mode {
            EditMode::A => {
                let raw_ops = payload.ops.as_deref().ok_or(AssistantError::MissingOps)?;
                (Some(validate_ops(raw_ops)?), None)
            }
            EditMode::B => {
                let markdown = payload
                    .markdown
                    .clone()
                    .ok_or(AssistantError::MissingMarkdown)?;
                (None, Some(markdown))
            }
        };

        Ok(EditOutcome {
            reply: Some(payload.reply).filter(|reply| !reply.is_empty()),
            base_hash: payload.base_hash.or_else(|| request.base_hash.clone()),
            summary: payload.summary,
            ack: payload.ack,
            ops,
            markdown,
        })
    }
}
