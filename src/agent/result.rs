use serde_json::Value;

/// Opaque result of one agent run.
///
/// Different runtimes and invocation modes fill different fields: a forced
/// tool call usually lands in `final_output`, free-form runs only leave raw
/// `output` items, and some encodings are only visible in `dump`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentResult {
    pub final_output: Option<Value>,
    /// Items generated during the run (tool outputs, messages).
    pub new_items: Option<Vec<Value>>,
    /// Raw model output items.
    pub output: Option<Vec<Value>>,
    /// Full serialized form of the result.
    pub dump: Value,
}

impl AgentResult {
    /// Raw output items, falling back to the `output` array of the dump.
    pub fn output_items(&self) -> &[Value] {
        if let Some(items) = &self.output {
            return items;
        }
        self.dump
            .get("output")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Recognized shapes of a single result item, keyed by its `type` tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultItem<'a> {
    /// `tool_call_output_item`: what a tool returned.
    ToolCallOutput { output: Option<&'a Value> },
    /// `tool_call` / `function_call`: what the model passed to a tool.
    ToolCall { arguments: Option<&'a Value> },
    /// `tool_result` / `function_result`.
    ToolResult {
        output: Option<&'a Value>,
        content: Option<&'a Value>,
    },
    Other,
}

impl<'a> ResultItem<'a> {
    pub fn classify(item: &'a Value) -> Self {
        let field = |key: &str| item.get(key).filter(|value| !value.is_null());
        match item.get("type").and_then(Value::as_str) {
            Some("tool_call_output_item") => Self::ToolCallOutput {
                output: field("output"),
            },
            Some("tool_call" | "function_call") => Self::ToolCall {
                arguments: field("arguments"),
            },
            Some("tool_result" | "function_result") => Self::ToolResult {
                output: field("output"),
                content: field("content"),
            },
            _ => Self::Other,
        }
    }
}
