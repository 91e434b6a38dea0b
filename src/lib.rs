#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod agent;
pub mod assistant;
pub mod config;
pub mod error;
pub mod gateway;
pub mod ops;
pub mod payload;
pub mod prompt;
pub mod session;
pub mod utils;

pub use assistant::Assistant;
pub use config::Config;
pub use error::{AssistantError, DraftError};
