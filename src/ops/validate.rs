use super::model::{DEFAULT_HEADING_LEVEL, EditOp, OpKind, RawOp};
use crate::utils::non_blank_field;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// First structural problem found in an op list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("Invalid op type: {0}")]
    InvalidKind(String),

    #[error("Missing markdown in op")]
    MissingMarkdown,

    #[error("Missing heading in op")]
    MissingHeading,
}

/// Check every op in order and materialize the typed list.
///
/// Stops at the first violation. Callers never pass an empty list: an empty
/// op list means "no edit requested" and is handled before validation.
pub fn validate_ops(ops: &[RawOp]) -> Result<Vec<EditOp>, OpError> {
    ops.iter().map(validate_op).collect()
}

fn validate_op(op: &RawOp) -> Result<EditOp, OpError> {
    let kind = op
        .get("op")
        .and_then(Value::as_str)
        .and_then(|name| OpKind::from_str(name).ok())
        .ok_or_else(|| OpError::InvalidKind(describe_discriminator(op.get("op"))))?;

    let markdown = non_blank_field(op, "markdown")
        .ok_or(OpError::MissingMarkdown)?
        .to_string();

    if !kind.targets_heading() {
        return Ok(EditOp::AppendMarkdown { markdown });
    }

    let heading = non_blank_field(op, "heading")
        .ok_or(OpError::MissingHeading)?
        .to_string();
    let level = op.get("level").and_then(coerce_level).unwrap_or(DEFAULT_HEADING_LEVEL);

    Ok(match kind {
        OpKind::ReplaceSectionByHeading => EditOp::ReplaceSectionByHeading {
            heading,
            level,
            markdown,
        },
        OpKind::InsertAfterHeading => EditOp::InsertAfterHeading {
            heading,
            level,
            markdown,
        },
        OpKind::AppendMarkdown => EditOp::AppendMarkdown { markdown },
    })
}

fn describe_discriminator(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

/// Accept `2`, `2.0` or `"2"`; anything outside 1..=6 is ignored.
fn coerce_level(value: &Value) -> Option<u8> {
    let level = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u8::try_from(level).ok().filter(|l| (1..=6).contains(l))
}
