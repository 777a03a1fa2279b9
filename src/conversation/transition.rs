//! Pure turn function
//!
//! Given the current session and an incoming message, decide the reply and
//! the changes to merge into the session. No I/O and no store access.

use super::replies::{self, Confirmation};
use super::rules;
use crate::session::{DraftField, Session, SessionState, SessionUpdate};
use chrono::{DateTime, Utc};

/// Outcome of one conversation turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub reply: String,
    pub update: SessionUpdate,
}

impl Turn {
    fn new(reply: impl Into<String>, update: SessionUpdate) -> Self {
        Self {
            reply: reply.into(),
            update,
        }
    }
}

/// Compute the turn for `text` arriving while in `session`.
///
/// Inside the booking flow any non-empty text answers the current prompt.
/// Everything else goes through the keyword rules, falling back to the
/// default reminder. Empty text always gets the reminder.
pub fn transition(session: &Session, text: &str, now: DateTime<Utc>) -> Turn {
    let answer = text.trim();

    if let Some(field) = session.state.collects() {
        if !answer.is_empty() {
            return booking_step(session, field, answer, now);
        }
    }

    match rules::classify(text) {
        Some(rule) => {
            tracing::debug!(topic = ?rule.topic, state = %session.state, "Matched keyword rule");
            let update = rule
                .next_state
                .map_or_else(SessionUpdate::touch, SessionUpdate::to_state);
            Turn::new(rule.reply, update)
        }
        None => Turn::new(replies::DEFAULT, SessionUpdate::touch()),
    }
}

fn booking_step(session: &Session, field: DraftField, answer: &str, now: DateTime<Utc>) -> Turn {
    let (prompt, next) = match field {
        DraftField::Name => (replies::ASK_CONTACT, SessionState::BookingContact),
        DraftField::Contact => (replies::ASK_PACKAGE, SessionState::BookingPackage),
        DraftField::Package => (replies::ASK_PEOPLE, SessionState::BookingPeople),
        DraftField::People => (replies::ASK_DATES, SessionState::BookingDates),
        DraftField::Dates => return complete_booking(session, answer, now),
    };
    Turn::new(prompt, SessionUpdate::to_state(next).recording(field, answer))
}

fn complete_booking(session: &Session, dates: &str, now: DateTime<Utc>) -> Turn {
    let draft = &session.draft;
    let value = |field| draft.get(field).unwrap_or_default();
    let reference = reference_code(now);

    let reply = Confirmation {
        name: value(DraftField::Name),
        contact: value(DraftField::Contact),
        package: value(DraftField::Package),
        people: value(DraftField::People),
        dates,
        reference: &reference,
    }
    .render();

    tracing::info!(
        sender = %session.sender_id,
        reference = %reference,
        "Booking request completed"
    );

    Turn::new(
        reply,
        SessionUpdate::to_state(SessionState::New).clearing_draft(),
    )
}

/// Short booking reference: `LA` plus the last six digits of the Unix time in
/// milliseconds. The suffix wraps every 1000 seconds, so codes are only
/// practically unique.
pub fn reference_code(now: DateTime<Utc>) -> String {
    format!("LA{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}
