// Prompt templates. Variables are always inserted by `PromptBuilder`, so a
// template referencing anything else fails to render in tests.

/// The op schema shown to the agent verbatim.
pub const ALLOWED_OPS: &str = "\
Allowed ops (array of objects, use JSON with double quotes):
- append_markdown: { \"op\": \"append_markdown\", \"markdown\": \"...\" }
- replace_section_by_heading: { \"op\": \"replace_section_by_heading\", \"heading\": \"Section Title\", \"level\": 2, \"markdown\": \"...\" }
- insert_after_heading: { \"op\": \"insert_after_heading\", \"heading\": \"Section Title\", \"level\": 2, \"markdown\": \"...\" }
";

pub(super) const MODE_A_RULE: &str = "\
Mode A: set opsJson to a JSON string encoding the ops array and leave markdown empty. \
Ops must target the Markdown document below.";

pub(super) const MODE_B_RULE: &str = "\
Mode B: set markdown to the complete revised document and leave opsJson empty.";

pub(super) const EDIT_NAME: &str = "edit";
pub(super) const CHAT_NAME: &str = "chat";

pub(super) const EDIT_TEMPLATE: &str = "\
You are editing an employee onboarding document. Call the document_edit_response tool. \
{{ mode_rule }}

{{ allowed_ops }}
Return opsJson as a JSON string (e.g. \"[{\\\"op\\\": ...}]\"), never as a bare array.
Acknowledge the recent revision string in ack. Make a deterministic edit based on the instruction.

Base hash (echo back): {{ base_hash }}
Schema hints: {{ schema_hints }}

Mode: {{ mode }}
Recent revision: {{ recent_revision }}

Instruction: {{ instruction }}

Content format: {{ content_format }}
Content:
{{ content }}";

pub(super) const CHAT_TEMPLATE: &str = "\
You are assisting with an employee onboarding document. Call the document_edit_response tool. \
If the user is just chatting (greetings, questions), do not edit: leave opsJson and markdown empty. \
Only edit when the user clearly asks for a change to the document. \
{{ mode_rule }}

{{ allowed_ops }}
Return opsJson as a JSON string (e.g. \"[{\\\"op\\\": ...}]\"), never as a bare array.
Reply conversationally and briefly in reply.

Base hash (echo back): {{ base_hash }}
Schema hints: {{ schema_hints }}

Mode: {{ mode }}
Message: {{ message }}

Content format: {{ content_format }}
Content:
{{ content }}";
