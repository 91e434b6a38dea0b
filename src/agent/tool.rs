use serde_json::{Map, Value, json};

/// The single tool the agent is forced to call.
pub const EDIT_TOOL_NAME: &str = "document_edit_response";

pub const EDIT_TOOL_DESCRIPTION: &str =
    "Return the document edit result: summary, ack, reply, echoed baseHash, \
     opsJson (mode A) or markdown (mode B).";

/// JSON schema for the tool arguments.
pub fn edit_tool_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {"type": "string", "description": "One-line summary of the change"},
            "ack": {"type": "string", "description": "Acknowledgement of the recent revision"},
            "reply": {"type": "string", "description": "Short conversational reply"},
            "baseHash": {"type": "string", "description": "Base hash echoed back unchanged"},
            "opsJson": {"type": "string", "description": "JSON string encoding the ops array (mode A)"},
            "markdown": {"type": ["string", "null"], "description": "Full revised Markdown (mode B)"}
        },
        "required": ["summary", "ack", "reply", "baseHash", "opsJson", "markdown"],
        "additionalProperties": false
    })
}

/// Local body of the tool: echo the arguments back as a JSON payload
/// string with every field present.
///
/// Text fields default to `""` and `markdown` to `null`; values of other
/// types are passed through untouched for the normalizer to judge.
pub fn document_edit_response(arguments: &Value) -> String {
    let field = |key: &str, default: Value| {
        arguments
            .get(key)
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or(default)
    };

    let mut payload = Map::new();
    for key in ["summary", "ack", "reply", "baseHash", "opsJson"] {
        payload.insert(key.to_string(), field(key, Value::String(String::new())));
    }
    payload.insert("markdown".to_string(), field("markdown", Value::Null));
    Value::Object(payload).to_string()
}
