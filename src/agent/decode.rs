//! Locate the structured payload inside an [`AgentResult`].
//!
//! Strategies run in a fixed order and the first one that yields a JSON
//! object wins:
//!
//! 1. `final_output` that is already an object
//! 2. `final_output` text that parses as an object
//! 3. a `tool_call_output_item` in `new_items` (object or JSON text)
//! 4. a tool/function call's `arguments`, or a tool/function result's
//!    `output`/`content`, in the raw `output` items (or the dump's)
//!
//! Text that is not valid JSON, or JSON that is not an object, never aborts
//! the decode; the walk simply moves on to the next candidate.

use super::result::{AgentResult, ResultItem};
use crate::payload::RawPayload;
use serde_json::Value;

/// Which strategy produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DecodeSource {
    FinalOutputMap,
    FinalOutputText,
    ToolCallOutput,
    ToolCallArguments,
    ToolResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub payload: RawPayload,
    pub source: DecodeSource,
}

/// Extract the raw payload, or `None` when no strategy recognizes the
/// result. Never panics.
pub fn decode_result(result: &AgentResult) -> Option<RawPayload> {
    decode_with_source(result).map(|decoded| decoded.payload)
}

pub fn decode_with_source(result: &AgentResult) -> Option<Decoded> {
    from_final_output(result)
        .or_else(|| from_new_items(result))
        .or_else(|| from_output_items(result))
}

fn from_final_output(result: &AgentResult) -> Option<Decoded> {
    match result.final_output.as_ref()? {
        Value::Object(map) => Some(decoded(map.clone(), DecodeSource::FinalOutputMap)),
        Value::String(text) => {
            parse_object(text).map(|map| decoded(map, DecodeSource::FinalOutputText))
        }
        _ => None,
    }
}

fn from_new_items(result: &AgentResult) -> Option<Decoded> {
    result
        .new_items
        .as_deref()?
        .iter()
        .find_map(|item| match ResultItem::classify(item) {
            ResultItem::ToolCallOutput { output: Some(output) } => {
                object_or_json_text(output).map(|map| decoded(map, DecodeSource::ToolCallOutput))
            }
            _ => None,
        })
}

fn from_output_items(result: &AgentResult) -> Option<Decoded> {
    result
        .output_items()
        .iter()
        .find_map(|item| match ResultItem::classify(item) {
            ResultItem::ToolCall {
                arguments: Some(arguments),
            } => object_or_json_text(arguments)
                .map(|map| decoded(map, DecodeSource::ToolCallArguments)),
            ResultItem::ToolResult { output, content } => output
                .filter(|value| !is_empty_text(value))
                .or(content)
                .and_then(object_or_json_text)
                .map(|map| decoded(map, DecodeSource::ToolResult)),
            _ => None,
        })
}

fn decoded(payload: RawPayload, source: DecodeSource) -> Decoded {
    Decoded { payload, source }
}

fn object_or_json_text(value: &Value) -> Option<RawPayload> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(text) => parse_object(text),
        _ => None,
    }
}

fn parse_object(text: &str) -> Option<RawPayload> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(error) => {
            tracing::debug!(%error, "agent text is not a JSON object");
            None
        }
    }
}

fn is_empty_text(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.is_empty())
}
