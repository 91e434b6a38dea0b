use crate::prompt::{ContentFormat, EditMode};
use serde_json::Value;

/// The document representations a caller may send along with a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSnapshot {
    pub markdown: Option<String>,
    pub doc_json: Option<Value>,
    pub html: Option<String>,
}

/// Pick the document text placed in the prompt.
///
/// Mode A takes Markdown if supplied at all (even empty), then the
/// structured snapshot rendered as JSON text, then non-empty HTML. Mode B
/// only ever looks at Markdown.
pub fn select_content(mode: EditMode, snapshot: &DocumentSnapshot) -> (String, ContentFormat) {
    if let Some(markdown) = &snapshot.markdown {
        return (markdown.clone(), ContentFormat::Markdown);
    }
    if mode == EditMode::B {
        return (String::new(), ContentFormat::Empty);
    }
    if let Some(doc_json) = &snapshot.doc_json {
        return (stringify_doc_json(doc_json), ContentFormat::DocJson);
    }
    match snapshot.html.as_deref() {
        Some(html) if !html.is_empty() => (html.to_string(), ContentFormat::Html),
        _ => (String::new(), ContentFormat::Empty),
    }
}

fn stringify_doc_json(doc_json: &Value) -> String {
    match doc_json {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
