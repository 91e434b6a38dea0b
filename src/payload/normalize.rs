use crate::ops::RawOp;
use crate::utils::non_blank_field;
use serde_json::Value;

/// Untyped key/value payload located by the result decoder.
pub type RawPayload = serde_json::Map<String, Value>;

/// Canonical agent payload.
///
/// In mode A `ops` is the edit channel and `markdown` is ignored; in mode B
/// the reverse. Nothing here enforces that, callers pick the field for the
/// active mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentPayload {
    pub summary: String,
    pub ack: String,
    pub reply: String,
    pub base_hash: Option<String>,
    /// Op maps awaiting validation; never `Some(vec![])`.
    pub ops: Option<Vec<RawOp>>,
    pub markdown: Option<String>,
}

impl AgentPayload {
    pub fn has_edit(&self) -> bool {
        self.ops.is_some() || self.markdown.is_some()
    }
}

/// Map a raw payload onto canonical fields. Never fails: malformed optional
/// fields degrade to empty strings or `None`.
pub fn normalize(raw: &RawPayload) -> AgentPayload {
    let text = |key: &str| non_blank_field(raw, key).map(str::to_string);

    // `opsJson` is the JSON-in-JSON encoding the tool schema asks for; a
    // plain `ops` array is accepted when it is missing or unusable.
    let ops = raw
        .get("opsJson")
        .and_then(parse_ops)
        .or_else(|| raw.get("ops").and_then(parse_ops));

    AgentPayload {
        summary: text("summary").unwrap_or_default(),
        ack: text("ack").unwrap_or_default(),
        reply: text("reply").unwrap_or_default(),
        base_hash: text("baseHash"),
        ops,
        markdown: text("markdown"),
    }
}

fn parse_ops(value: &Value) -> Option<Vec<RawOp>> {
    match value {
        Value::String(encoded) => {
            if encoded.trim().is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(encoded) {
                Ok(decoded) => coerce_ops(&decoded),
                Err(error) => {
                    tracing::debug!(%error, "ignoring unparsable ops encoding");
                    None
                }
            }
        }
        other => coerce_ops(other),
    }
}

/// Keep only the map elements of an array; an empty result means no ops.
fn coerce_ops(value: &Value) -> Option<Vec<RawOp>> {
    let items = value.as_array()?;
    let ops: Vec<RawOp> = items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect();
    (!ops.is_empty()).then_some(ops)
}
