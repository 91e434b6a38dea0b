//! Deterministic rendering of the instruction text sent to the agent.

mod builder;
mod templates;
pub mod types;

pub use builder::{FALLBACK_INSTRUCTION, PromptBuilder, PromptParams};
pub use templates::ALLOWED_OPS;
pub use types::{ContentFormat, EditMode, RequestKind};
