//! Canonical response fields extracted from whatever the agent handed back.

pub mod normalize;

pub use normalize::{AgentPayload, RawPayload, normalize};
