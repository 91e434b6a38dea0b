pub mod store;
pub mod types;

pub use store::{DEFAULT_SESSION_ID, MAX_SESSION_ITEMS, SessionGuard, SessionStore, trim_turns};
pub use types::{ChatRole, ChatTurn};
