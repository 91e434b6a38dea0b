//! Bounded per-session chat history.
//!
//! Each session id owns its own async mutex. The chat orchestrator holds
//! that lock from the history read until the new turns are recorded, so
//! two requests against the same session can never interleave their
//! read-modify-write cycles. Different sessions never contend.

use super::types::ChatTurn;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Compact turns kept per session; older turns are forgotten.
pub const MAX_SESSION_ITEMS: usize = 12;

/// Session used when a chat request carries no id.
pub const DEFAULT_SESSION_ID: &str = "default";

type SessionSlot = Arc<AsyncMutex<Vec<ChatTurn>>>;

/// Keep the last `max_items` turns, preserving order.
pub fn trim_turns(mut turns: Vec<ChatTurn>, max_items: usize) -> Vec<ChatTurn> {
    let excess = turns.len().saturating_sub(max_items);
    turns.drain(..excess);
    turns
}

/// Process-lifetime session history, shared by handle.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionSlot>>,
    max_items: usize,
}

impl SessionStore {
    pub fn new(max_items: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_items,
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Number of sessions seen so far.
    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn existing_slot(&self, session_id: &str) -> Option<SessionSlot> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    fn slot(&self, session_id: &str) -> SessionSlot {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(Vec::new()))),
        )
    }

    /// Snapshot of a session's turns; empty for unseen ids.
    pub async fn get(&self, session_id: &str) -> Vec<ChatTurn> {
        match self.existing_slot(session_id) {
            Some(slot) => slot.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// Enter the exclusive section for `session_id`, waiting for any
    /// in-flight request on the same session to finish.
    pub async fn lock(&self, session_id: &str) -> SessionGuard {
        let turns = self.slot(session_id).lock_owned().await;
        SessionGuard {
            session_id: session_id.to_string(),
            turns,
            max_items: self.max_items,
        }
    }

    /// Append turns and trim, in one exclusive step.
    pub async fn append_and_trim(
        &self,
        session_id: &str,
        turns: impl IntoIterator<Item = ChatTurn>,
    ) {
        self.lock(session_id).await.record(turns);
    }

    pub fn trim(&self, turns: Vec<ChatTurn>) -> Vec<ChatTurn> {
        trim_turns(turns, self.max_items)
    }

    /// Trim loosely typed entries: malformed ones are dropped first, then
    /// the last `max_items` well-formed turns are kept.
    pub fn trim_items(&self, items: &[Value]) -> Vec<ChatTurn> {
        let compact = items.iter().filter_map(ChatTurn::from_value).collect();
        self.trim(compact)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(MAX_SESSION_ITEMS)
    }
}

/// Exclusive access to one session's history.
pub struct SessionGuard {
    session_id: String,
    turns: OwnedMutexGuard<Vec<ChatTurn>>,
    max_items: usize,
}

impl SessionGuard {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Append in chronological order, then drop from the front.
    pub fn record(&mut self, turns: impl IntoIterator<Item = ChatTurn>) {
        let mut next = std::mem::take(&mut *self.turns);
        next.extend(turns);
        *self.turns = trim_turns(next, self.max_items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn numbered(n: usize) -> Vec<ChatTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::user(format!("turn {i}"))
                } else {
                    ChatTurn::assistant(format!("turn {i}"))
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn unseen_session_is_empty_and_not_created() {
        let store = SessionStore::default();
        assert!(store.get("nobody").await.is_empty());
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn fifteen_turns_keep_last_twelve_in_order() {
        let store = SessionStore::default();
        store.append_and_trim("s1", numbered(15)).await;

        let history = store.get("s1").await;
        assert_eq!(history.len(), MAX_SESSION_ITEMS);
        assert_eq!(history, numbered(15)[3..].to_vec());
        assert_eq!(history.first().unwrap().content, "turn 3");
        assert_eq!(history.last().unwrap().content, "turn 14");
    }

    #[tokio::test]
    async fn repeated_appends_drop_from_front() {
        let store = SessionStore::new(4);
        store
            .append_and_trim("s", [ChatTurn::user("a"), ChatTurn::assistant("b")])
            .await;
        store
            .append_and_trim("s", [ChatTurn::user("c"), ChatTurn::assistant("d")])
            .await;
        store
            .append_and_trim("s", [ChatTurn::user("e"), ChatTurn::assistant("f")])
            .await;
        let contents: Vec<_> = store.get("s").await.into_iter().map(|t| t.content).collect();
        assert_eq!(contents, vec!["c", "d", "e", "f"]);
    }

    #[test]
    fn trim_items_drops_malformed_even_within_window() {
        let store = SessionStore::default();
        let mut items: Vec<Value> = (0..15)
            .map(|i| json!({"role": "user", "content": format!("m{i}")}))
            .collect();
        items[14] = json!({"role": "user", "content": 14});
        items[13] = json!({"role": null, "content": "m13"});

        let trimmed = store.trim_items(&items);
        assert_eq!(trimmed.len(), MAX_SESSION_ITEMS);
        assert_eq!(trimmed.first().unwrap().content, "m1");
        assert_eq!(trimmed.last().unwrap().content, "m12");
    }

    #[test]
    fn trim_short_list_is_unchanged() {
        assert_eq!(trim_turns(numbered(3), 12), numbered(3));
        assert!(trim_turns(Vec::new(), 12).is_empty());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::default();
        store.append_and_trim("a", [ChatTurn::user("for a")]).await;
        store.append_and_trim("b", [ChatTurn::user("for b")]).await;
        assert_eq!(store.get("a").await, vec![ChatTurn::user("for a")]);
        assert_eq!(store.get("b").await, vec![ChatTurn::user("for b")]);
        assert_eq!(store.session_count(), 2);
    }

    #[tokio::test]
    async fn same_session_updates_are_serialized() {
        let store = Arc::new(SessionStore::new(64));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let mut guard = store.lock("shared").await;
                let seen = guard.history().len();
                tokio::time::sleep(Duration::from_millis(5)).await;
                guard.record([
                    ChatTurn::user(format!("q{i}")),
                    ChatTurn::assistant(format!("a{i}")),
                ]);
                seen
            }));
        }

        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort_unstable();

        // Every request observed the complete result of the one before it.
        assert_eq!(seen, (0..8).map(|i| i * 2).collect::<Vec<_>>());
        let history = store.get("shared").await;
        assert_eq!(history.len(), 16);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].content[1..], pair[1].content[1..]);
        }
    }
}
