//! Boundary with the external generative-agent runtime.
//!
//! The runtime is a black box that returns an [`AgentResult`] of no fixed
//! shape; [`decode_result`] is the only code that looks inside it.

pub mod decode;
pub mod http_client;
pub mod openai;
pub mod result;
pub mod scrub;
pub mod tool;
pub mod traits;

pub use decode::{DecodeSource, Decoded, decode_result, decode_with_source};
pub use openai::OpenAiAgentRuntime;
pub use result::{AgentResult, ResultItem};
pub use scrub::{sanitize_agent_error, scrub_secret_patterns};
pub use tool::{EDIT_TOOL_NAME, document_edit_response};
pub use traits::{AgentInput, AgentRuntime};
