use super::http_client::build_agent_client;
use super::result::AgentResult;
use super::scrub::api_error;
use super::tool::{
    EDIT_TOOL_DESCRIPTION, EDIT_TOOL_NAME, document_edit_response, edit_tool_parameters,
};
use super::traits::{AgentInput, AgentRuntime};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_MODEL: &str = "gpt-5.2";

pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Standing instructions sent with every call.
pub const AGENT_INSTRUCTIONS: &str = "You are an AI assistant helping to edit and improve \
employee onboarding documents. Always call the document_edit_response tool. Do not return \
JSON in plain text.";

/// Agent runtime backed by the OpenAI Responses API.
///
/// The edit tool is forced through `tool_choice` and executed locally as
/// soon as the model calls it; the run stops at the first tool call.
pub struct OpenAiAgentRuntime {
    /// Pre-computed `"Bearer <key>"` header value.
    cached_auth_header: String,
    base_url: String,
    model: String,
    temperature: Option<f64>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'static str,
    input: Vec<InputMessage>,
    tools: Vec<FunctionTool>,
    tool_choice: ToolChoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct FunctionTool {
    r#type: &'static str,
    name: &'static str,
    description: &'static str,
    parameters: Value,
    strict: bool,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    r#type: &'static str,
    name: &'static str,
}

impl OpenAiAgentRuntime {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            cached_auth_header: format!("Bearer {api_key}"),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.to_string(),
            temperature: None,
            client: build_agent_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.client = build_agent_client(timeout_secs);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, input: AgentInput) -> ResponsesRequest<'_> {
        let input = input
            .into_turns()
            .into_iter()
            .map(|turn| InputMessage {
                role: turn.role.to_string(),
                content: turn.content,
            })
            .collect();

        ResponsesRequest {
            model: &self.model,
            instructions: AGENT_INSTRUCTIONS,
            input,
            tools: vec![FunctionTool {
                r#type: "function",
                name: EDIT_TOOL_NAME,
                description: EDIT_TOOL_DESCRIPTION,
                parameters: edit_tool_parameters(),
                strict: true,
            }],
            tool_choice: ToolChoice {
                r#type: "function",
                name: EDIT_TOOL_NAME,
            },
            temperature: self.temperature,
        }
    }

    async fn call_api_with_request(&self, request: &ResponsesRequest<'_>) -> anyhow::Result<Value> {
        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .header("Authorization", &self.cached_auth_header)
            .json(request)
            .send()
            .await
            .context("OpenAI request failed")?;

        if !response.status().is_success() {
            return Err(api_error("OpenAI", response).await);
        }

        response
            .json()
            .await
            .context("OpenAI response JSON decode failed")
    }

    /// Turn the raw response into an [`AgentResult`], running the edit tool
    /// on the first call to it.
    fn into_result(dump: Value) -> AgentResult {
        let output = dump.get("output").and_then(Value::as_array).cloned();
        let items = output.as_deref().unwrap_or_default();

        if let Some(tool_output) = Self::run_first_tool_call(items) {
            let item = json!({
                "type": "tool_call_output_item",
                "output": tool_output,
            });
            return AgentResult {
                final_output: Some(Value::String(tool_output)),
                new_items: Some(vec![item]),
                output,
                dump,
            };
        }

        let text = Self::collect_output_text(items);
        AgentResult {
            final_output: (!text.is_empty()).then(|| Value::String(text)),
            new_items: None,
            output,
            dump,
        }
    }

    fn run_first_tool_call(items: &[Value]) -> Option<String> {
        let call = items.iter().find(|item| {
            item.get("type").and_then(Value::as_str) == Some("function_call")
                && item.get("name").and_then(Value::as_str) == Some(EDIT_TOOL_NAME)
        })?;

        // Arguments that fail to parse are left in `output` for the decoder.
        let arguments = match call.get("arguments")? {
            Value::String(text) => serde_json::from_str::<Value>(text).ok()?,
            other => other.clone(),
        };
        Some(document_edit_response(&arguments))
    }

    fn collect_output_text(items: &[Value]) -> String {
        items
            .iter()
            .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
            .filter_map(|item| item.get("content").and_then(Value::as_array))
            .flatten()
            .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect()
    }
}

#[async_trait]
impl AgentRuntime for OpenAiAgentRuntime {
    fn name(&self) -> &str {
        "openai"
    }

    async fn run(&self, input: AgentInput) -> anyhow::Result<AgentResult> {
        let request = self.build_request(input);
        let dump = self.call_api_with_request(&request).await?;
        Ok(Self::into_result(dump))
    }
}
