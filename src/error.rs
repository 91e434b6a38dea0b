use crate::ops::OpError;
use crate::prompt::RequestKind;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `Draftwright`.
///
/// Request-path failures are `AssistantError`s and map onto a single
/// "operation failed" HTTP signal; startup plumbing keeps using
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum DraftError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Edit / chat orchestration ───────────────────────────────────────
    #[error("assistant: {0}")]
    Assistant(#[from] AssistantError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Orchestration errors ───────────────────────────────────────────────────

/// Every way an edit or chat request can fail.
///
/// None of these are retried and none of them are fatal to the process;
/// the gateway renders each one as a 502 carrying the `Display` text.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No credential or no runtime configured.
    #[error("Agent unavailable")]
    AgentUnavailable,

    #[error("Agent call timed out after {secs}s")]
    AgentTimeout { secs: u64 },

    /// Transport or API failure inside the runtime (already scrubbed).
    #[error("Agent call failed: {0}")]
    AgentCall(String),

    /// The agent result could not be mapped to a payload.
    #[error("Agent {kind} failed")]
    DecodeFailed { kind: RequestKind },

    #[error("Agent edit returned no ops")]
    MissingOps,

    #[error("Agent edit returned no markdown")]
    MissingMarkdown,

    #[error("Prompt rendering failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    InvalidOp(#[from] OpError),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, DraftError>;
