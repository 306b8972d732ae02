//! In-memory session store
//!
//! Backed by a sharded `DashMap`. A merge holds the entry lock for its whole
//! read-modify-write, so concurrent merges into one session never lose a
//! field. Sessions live for the life of the process.

use dashmap::DashMap;
use solar_agent_core::{SessionRecord, SessionStore, SessionUpdate};

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionRecord>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<SessionRecord> {
        self.sessions.get(session_id).map(|r| r.value().clone())
    }

    fn merge(&self, session_id: &str, update: &SessionUpdate) -> SessionRecord {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session = session_id, "Session created");
                SessionRecord::default()
            });
        entry.apply(update);
        entry.value().clone()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
