use super::result::AgentResult;
use crate::session::ChatTurn;
use async_trait::async_trait;

/// What the agent is asked to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentInput {
    /// A single self-contained instruction (edit requests).
    Prompt(String),
    /// Prior chat turns followed by the freshly built prompt as the newest
    /// user turn.
    Conversation {
        history: Vec<ChatTurn>,
        prompt: String,
    },
}

impl AgentInput {
    /// Flatten into chronological turns, newest last.
    pub fn into_turns(self) -> Vec<ChatTurn> {
        match self {
            Self::Prompt(prompt) => vec![ChatTurn::user(prompt)],
            Self::Conversation {
                mut history,
                prompt,
            } => {
                history.push(ChatTurn::user(prompt));
                history
            }
        }
    }
}

#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// One call to the generator. Transport and API failures are errors;
    /// an unexpected result shape is not, it surfaces later as an
    /// undecodable [`AgentResult`].
    async fn run(&self, input: AgentInput) -> anyhow::Result<AgentResult>;
}
