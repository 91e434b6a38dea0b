//! Axum HTTP surface: `POST /edit`, `POST /chat`, `GET /health`.
//!
//! Every orchestration failure maps to `502 {"detail": reason}`. Body size
//! and whole-request time are capped by tower-http layers.

mod handlers;
mod server;
pub mod types;

pub use server::{build_app, build_state, run_gateway, run_gateway_with_listener};

use crate::assistant::Assistant;
use std::sync::Arc;

/// Shared state for all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}
