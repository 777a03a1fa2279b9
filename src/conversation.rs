//! Conversation engine
//!
//! Turns an inbound message into a reply, keeping the sender's session in
//! step. Classification and state changes are computed by the pure
//! [`transition`] function; the engine only runs it under the sender's lock
//! and merges the result back into the store.

pub mod replies;
pub mod rules;
mod transition;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // reference_code is used by tests
pub use transition::{reference_code, transition, Turn};

use crate::session::SessionStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A verified inbound message
///
/// Callers reject events with an empty body or sender before building one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender_id: String,
    pub body: String,
}

impl InboundMessage {
    pub fn new(sender_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            body: body.into(),
        }
    }
}

pub struct ConversationEngine<S> {
    store: Arc<S>,
}

impl<S: SessionStore> ConversationEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Process one message and return the reply text.
    ///
    /// Never fails: anything unrecognised gets the default reminder.
    pub fn respond(&self, message: &InboundMessage, now: DateTime<Utc>) -> String {
        self.store.with_session(&message.sender_id, now, |session| {
            let previous = session.state;
            let Turn { reply, update } = transition(session, &message.body, now);
            session.apply(update, now);

            tracing::debug!(
                sender = %message.sender_id,
                from = %previous,
                to = %session.state,
                "Conversation turn"
            );
            reply
        })
    }
}
