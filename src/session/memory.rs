//! In-process session store

use super::{Session, SessionError, SessionStore, SessionUpdate};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

type SessionHandle = Arc<Mutex<Session>>;

/// Sessions keyed by sender, each behind its own lock
///
/// The map lock is only held long enough to find or insert a handle, so a
/// slow turn for one sender never blocks another. `sweep` takes the map write
/// lock, which means no handle can be handed out while it decides; a handle
/// still referenced outside the map belongs to an in-flight turn and is kept.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn existing(&self, sender_id: &str) -> Option<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(sender_id)
            .cloned()
    }

    fn handle(&self, sender_id: &str, now: DateTime<Utc>) -> SessionHandle {
        if let Some(handle) = self.existing(sender_id) {
            return handle;
        }

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(sender_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(sender = %sender_id, "Creating session");
                Arc::new(Mutex::new(Session::new(sender_id, now)))
            })
            .clone()
    }
}

fn lock(handle: &SessionHandle) -> MutexGuard<'_, Session> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore for InMemorySessionStore {
    fn get_or_create(&self, sender_id: &str, now: DateTime<Utc>) -> Session {
        let handle = self.handle(sender_id, now);
        let session = lock(&handle).clone();
        session
    }

    fn update(
        &self,
        sender_id: &str,
        update: SessionUpdate,
        now: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        let handle = self
            .existing(sender_id)
            .ok_or_else(|| SessionError::NotFound(sender_id.to_string()))?;
        let mut session = lock(&handle);
        session.apply(update, now);
        Ok(session.clone())
    }

    fn with_session<R>(
        &self,
        sender_id: &str,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut Session) -> R,
    ) -> R {
        let handle = self.handle(sender_id, now);
        let mut session = lock(&handle);
        f(&mut session)
    }

    fn sweep(&self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();

        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(session) => !session.is_stale(now, max_age),
                Err(_) => true,
            }
        });

        before - sessions.len()
    }

    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
