use crate::session::Session;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// One user's slot in the store: the session state behind its per-user
/// mutex, plus the interaction generation counter.
///
/// The generation lives outside the mutex so it can be bumped without
/// waiting on the session lock — a cancel must be able to invalidate a
/// reply whose translation is still in flight, even while the handler for
/// the previous event holds the lock.
#[derive(Debug)]
pub struct SessionEntry {
    state: Mutex<Session>,
    generation: AtomicU64,
}

impl SessionEntry {
    fn new(user_id: &str) -> Self {
        Self {
            state: Mutex::new(Session::new(user_id)),
            generation: AtomicU64::new(0),
        }
    }

    /// Locks the session state.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.state.lock().await
    }

    /// Current interaction generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Bumps the generation, invalidating replies computed under earlier
    /// generations. Returns the new value.
    pub fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Process-wide table of per-user sessions.
///
/// Each user's session lives behind its own `tokio::sync::Mutex`. The
/// dispatcher acquires that mutex for the state mutation of one inbound
/// event, which serializes same-user mutations without blocking other
/// users. The outer index is a synchronous `RwLock` held only for map
/// lookups, never across an await point.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<SessionEntry>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session entry for `user_id`, creating it at the entry
    /// stage on first access. Creation is idempotent: concurrent callers for
    /// the same unknown user all end up with the same entry.
    pub fn entry(&self, user_id: &str) -> Arc<SessionEntry> {
        if let Some(entry) = self.sessions.read().get(user_id) {
            return Arc::clone(entry);
        }
        let mut sessions = self.sessions.write();
        Arc::clone(
            sessions
                .entry(user_id.to_string())
                .or_insert_with(|| Arc::new(SessionEntry::new(user_id))),
        )
    }

    /// Returns the session entry for `user_id` without creating one.
    pub fn get(&self, user_id: &str) -> Option<Arc<SessionEntry>> {
        self.sessions.read().get(user_id).map(Arc::clone)
    }

    /// Snapshot of a session without creating one.
    pub async fn peek(&self, user_id: &str) -> Option<Session> {
        let entry = self.get(user_id)?;
        let session = entry.lock().await;
        Some(session.clone())
    }

    /// Removes a session. Returns true when one existed.
    pub fn remove(&self, user_id: &str) -> bool {
        self.sessions.write().remove(user_id).is_some()
    }

    /// Number of tracked sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True when no sessions are tracked.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Evicts sessions idle for longer than `max_idle`.
    ///
    /// Sessions in manual mode are never evicted: an operator conversation
    /// must not vanish mid-relay. Entries currently locked by an in-flight
    /// event are skipped and picked up by a later sweep.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let max_idle_secs = max_idle.as_secs() as i64;
        let mut removed = 0;
        self.sessions.write().retain(|user_id, entry| {
            let Ok(session) = entry.state.try_lock() else {
                return true;
            };
            if session.manual_mode || session.idle_secs(now) <= max_idle_secs {
                return true;
            }
            debug!(user_id = %user_id, "evicting idle session");
            removed += 1;
            false
        });
        removed
    }
}
