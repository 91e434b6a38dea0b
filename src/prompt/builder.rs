use super::templates::{
    ALLOWED_OPS, CHAT_NAME, CHAT_TEMPLATE, EDIT_NAME, EDIT_TEMPLATE, MODE_A_RULE, MODE_B_RULE,
};
use super::types::{ContentFormat, EditMode, RequestKind};
use tera::{Context, Tera};

/// Used when an edit request carries no instruction text.
pub const FALLBACK_INSTRUCTION: &str =
    "Add a Tips for Success section with three helpful onboarding tips.";

/// Everything a prompt is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct PromptParams<'a> {
    pub kind: RequestKind,
    pub mode: EditMode,
    pub content: &'a str,
    pub content_format: ContentFormat,
    pub base_hash: Option<&'a str>,
    pub schema_hints: Option<&'a str>,
    /// Edit only.
    pub recent_revision: &'a str,
    /// Edit only; blank falls back to [`FALLBACK_INSTRUCTION`].
    pub instruction: &'a str,
    /// Chat only.
    pub message: &'a str,
}

impl<'a> PromptParams<'a> {
    pub fn new(kind: RequestKind, mode: EditMode) -> Self {
        Self {
            kind,
            mode,
            content: "",
            content_format: ContentFormat::Empty,
            base_hash: None,
            schema_hints: None,
            recent_revision: "",
            instruction: "",
            message: "",
        }
    }
}

/// Renders the edit and chat templates.
///
/// Output is a pure function of [`PromptParams`]: no clock, no randomness,
/// no state, so identical requests always produce identical prompts.
pub struct PromptBuilder {
    tera: Tera,
}

impl PromptBuilder {
    pub fn new() -> anyhow::Result<Self> {
        // Template names carry no `.html` suffix, so nothing is autoescaped.
        let mut tera = Tera::default();
        tera.add_raw_templates([(EDIT_NAME, EDIT_TEMPLATE), (CHAT_NAME, CHAT_TEMPLATE)])?;
        Ok(Self { tera })
    }

    pub fn build(&self, params: &PromptParams<'_>) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("allowed_ops", ALLOWED_OPS);
        ctx.insert("mode", &params.mode.to_string());
        ctx.insert(
            "mode_rule",
            match params.mode {
                EditMode::A => MODE_A_RULE,
                EditMode::B => MODE_B_RULE,
            },
        );
        ctx.insert("base_hash", params.base_hash.unwrap_or_default());
        ctx.insert("schema_hints", params.schema_hints.unwrap_or_default());
        ctx.insert("content_format", &params.content_format.to_string());
        ctx.insert("content", params.content);

        let template = match params.kind {
            RequestKind::Edit => {
                let instruction = match params.instruction.trim() {
                    "" => FALLBACK_INSTRUCTION,
                    trimmed => trimmed,
                };
                ctx.insert("recent_revision", params.recent_revision);
                ctx.insert("instruction", instruction);
                EDIT_NAME
            }
            RequestKind::Chat => {
                ctx.insert("message", params.message);
                CHAT_NAME
            }
        };

        Ok(self.tera.render(template, &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new().unwrap()
    }

    fn edit_params<'a>(instruction: &'a str, content: &'a str) -> PromptParams<'a> {
        PromptParams {
            content,
            content_format: ContentFormat::Markdown,
            base_hash: Some("hash-1"),
            schema_hints: Some("headings are h2"),
            recent_revision: "rev-7",
            instruction,
            ..PromptParams::new(RequestKind::Edit, EditMode::A)
        }
    }

    #[test]
    fn edit_prompt_carries_all_fields() {
        let prompt = builder()
            .build(&edit_params("add a tips section", "# Welcome"))
            .unwrap();

        assert!(prompt.contains("document_edit_response"));
        assert!(prompt.contains(ALLOWED_OPS));
        assert!(prompt.contains(MODE_A_RULE));
        assert!(!prompt.contains(MODE_B_RULE));
        assert!(prompt.contains("Base hash (echo back): hash-1"));
        assert!(prompt.contains("Schema hints: headings are h2"));
        assert!(prompt.contains("Mode: A"));
        assert!(prompt.contains("Recent revision: rev-7"));
        assert!(prompt.contains("Instruction: add a tips section"));
        assert!(prompt.contains("Content format: markdown"));
        assert!(prompt.ends_with("Content:\n# Welcome"));
    }

    #[test]
    fn blank_instruction_uses_fallback() {
        let prompt = builder().build(&edit_params("   ", "")).unwrap();
        assert!(prompt.contains(&format!("Instruction: {FALLBACK_INSTRUCTION}")));
    }

    #[test]
    fn mode_b_swaps_the_rule() {
        let params = PromptParams {
            mode: EditMode::B,
            ..edit_params("rewrite", "text")
        };
        let prompt = builder().build(&params).unwrap();
        assert!(prompt.contains(MODE_B_RULE));
        assert!(!prompt.contains(MODE_A_RULE));
        assert!(prompt.contains("Mode: B"));
    }

    #[test]
    fn chat_prompt_uses_message_not_instruction() {
        let params = PromptParams {
            message: "hi",
            instruction: "ignored",
            content: "{\"type\":\"doc\"}",
            content_format: ContentFormat::DocJson,
            ..PromptParams::new(RequestKind::Chat, EditMode::A)
        };
        let prompt = builder().build(&params).unwrap();
        assert!(prompt.contains("Message: hi"));
        assert!(!prompt.contains("Instruction:"));
        assert!(!prompt.contains("Recent revision:"));
        assert!(prompt.contains("do not edit"));
        assert!(prompt.contains("Content format: doc_json"));
        assert!(prompt.contains("{\"type\":\"doc\"}"));
    }

    #[test]
    fn missing_optionals_render_empty() {
        let prompt = builder()
            .build(&PromptParams::new(RequestKind::Chat, EditMode::A))
            .unwrap();
        assert!(prompt.contains("Base hash (echo back): \n"));
        assert!(prompt.contains("Schema hints: \n"));
        assert!(prompt.contains("Content format: empty"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let params = edit_params("add a tips section", "# Doc\n\n## Intro");
        let first = builder().build(&params).unwrap();
        let second = builder().build(&params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn content_is_inserted_verbatim() {
        let content = "{{ not a variable }} {% raw %} <b>&</b>";
        let prompt = builder().build(&edit_params("x", content)).unwrap();
        assert!(prompt.ends_with(content));
    }
}
