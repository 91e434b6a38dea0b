//! Edit and chat orchestration.
//!
//! Both flows run the same pipeline: select content, build the prompt,
//! call the agent under a deadline, decode, normalize, then apply the
//! mode's acceptance rules. Decode and normalization never fail on their
//! own; only this layer decides pass or fail.

pub mod chat;
pub mod content;
pub mod edit;

pub use chat::{ChatOutcome, ChatRequest, REPLY_APPLIED, REPLY_OKAY};
pub use content::{DocumentSnapshot, select_content};
pub use edit::{EditOutcome, EditRequest};

use crate::agent::{AgentInput, AgentRuntime, decode_with_source, sanitize_agent_error};
use crate::error::AssistantError;
use crate::payload::RawPayload;
use crate::prompt::{PromptBuilder, PromptParams, RequestKind};
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_AGENT_TIMEOUT: Duration = Duration::from_secs(90);

pub struct Assistant {
    runtime: Option<Arc<dyn AgentRuntime>>,
    sessions: Arc<SessionStore>,
    prompts: PromptBuilder,
    agent_timeout: Duration,
}

impl Assistant {
    /// `runtime` is `None` when no credential is configured; every request
    /// then fails with [`AssistantError::AgentUnavailable`].
    pub fn new(
        runtime: Option<Arc<dyn AgentRuntime>>,
        sessions: Arc<SessionStore>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            runtime,
            sessions,
            prompts: PromptBuilder::new()?,
            agent_timeout: DEFAULT_AGENT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_agent_timeout(mut self, agent_timeout: Duration) -> Self {
        self.agent_timeout = agent_timeout;
        self
    }

    pub fn is_available(&self) -> bool {
        self.runtime.is_some()
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    fn render_prompt(&self, params: &PromptParams<'_>) -> Result<String, AssistantError> {
        self.prompts
            .build(params)
            .map_err(|err| AssistantError::Prompt(err.to_string()))
    }

    /// One agent round trip, ending in a non-empty raw payload.
    async fn call_agent(
        &self,
        kind: RequestKind,
        input: AgentInput,
    ) -> Result<RawPayload, AssistantError> {
        let runtime = self.runtime.as_ref().ok_or_else(|| {
            tracing::warn!(%kind, "agent call skipped: no runtime configured");
            AssistantError::AgentUnavailable
        })?;

        let result = match tokio::time::timeout(self.agent_timeout, runtime.run(input)).await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                let reason = sanitize_agent_error(&format!("{err:#}"));
                tracing::error!(%kind, runtime = runtime.name(), "agent call failed: {reason}");
                return Err(AssistantError::AgentCall(reason));
            }
            Err(_) => {
                let secs = self.agent_timeout.as_secs();
                tracing::warn!(%kind, secs, "agent call timed out");
                return Err(AssistantError::AgentTimeout { secs });
            }
        };

        match decode_with_source(&result) {
            Some(decoded) if !decoded.payload.is_empty() => {
                tracing::debug!(%kind, source = %decoded.source, "agent payload decoded");
                Ok(decoded.payload)
            }
            _ => {
                tracing::warn!(%kind, "agent result carried no payload");
                Err(AssistantError::DecodeFailed { kind })
            }
        }
    }
}
