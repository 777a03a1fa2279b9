//! Per-sender conversation sessions
//!
//! Sessions live only for the lifetime of the process. The store is injected
//! into the conversation engine and swept periodically by the process owner.

mod memory;
mod state;

pub use memory::InMemorySessionStore;
pub use state::{DraftField, Session, SessionState, SessionUpdate};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No session for sender: {0}")]
    NotFound(String),
}

/// Storage for sender sessions
///
/// Implementations must serialise read-modify-write sequences per sender
/// while letting different senders proceed independently.
pub trait SessionStore: Send + Sync {
    /// Return a snapshot of the sender's session, creating it in the `new`
    /// state if it does not exist yet.
    #[allow(dead_code)] // Store API; the engine goes through `with_session`
    fn get_or_create(&self, sender_id: &str, now: DateTime<Utc>) -> Session;

    /// Merge `update` into an existing session and refresh its interaction
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] when the sender has no session.
    /// Callers are expected to go through `get_or_create` first.
    #[allow(dead_code)] // Store API; the engine goes through `with_session`
    fn update(
        &self,
        sender_id: &str,
        update: SessionUpdate,
        now: DateTime<Utc>,
    ) -> Result<Session, SessionError>;

    /// Look up or create the sender's session and run `f` on it while holding
    /// that sender's lock.
    fn with_session<R>(
        &self,
        sender_id: &str,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut Session) -> R,
    ) -> R;

    /// Evict every idle session whose last interaction is more than `max_age`
    /// before `now`. Sessions with a turn in flight are never evicted.
    fn sweep(&self, now: DateTime<Utc>, max_age: Duration) -> usize;

    /// Number of live sessions
    fn len(&self) -> usize;

    #[allow(dead_code)] // API completeness
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
