//! Session state types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Where a sender currently is in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    New,
    Menu,
    BookingName,
    BookingContact,
    BookingPackage,
    BookingPeople,
    BookingDates,
}

impl SessionState {
    #[allow(dead_code)] // Used in tests
    pub const ALL: [SessionState; 7] = [
        SessionState::New,
        SessionState::Menu,
        SessionState::BookingName,
        SessionState::BookingContact,
        SessionState::BookingPackage,
        SessionState::BookingPeople,
        SessionState::BookingDates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::New => "new",
            SessionState::Menu => "menu",
            SessionState::BookingName => "booking_name",
            SessionState::BookingContact => "booking_contact",
            SessionState::BookingPackage => "booking_package",
            SessionState::BookingPeople => "booking_people",
            SessionState::BookingDates => "booking_dates",
        }
    }

    /// True while the sender is answering booking prompts
    pub fn is_booking(self) -> bool {
        self.collects().is_some()
    }

    /// The draft field answered by a message received in this state
    pub fn collects(self) -> Option<DraftField> {
        match self {
            SessionState::BookingName => Some(DraftField::Name),
            SessionState::BookingContact => Some(DraftField::Contact),
            SessionState::BookingPackage => Some(DraftField::Package),
            SessionState::BookingPeople => Some(DraftField::People),
            SessionState::BookingDates => Some(DraftField::Dates),
            SessionState::New | SessionState::Menu => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Contact,
    Package,
    People,
    Dates,
}

/// Booking fields collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub package: Option<String>,
    pub people: Option<String>,
    pub dates: Option<String>,
}

impl BookingDraft {
    pub fn get(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::Name => self.name.as_deref(),
            DraftField::Contact => self.contact.as_deref(),
            DraftField::Package => self.package.as_deref(),
            DraftField::People => self.people.as_deref(),
            DraftField::Dates => self.dates.as_deref(),
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Contact => &mut self.contact,
            DraftField::Package => &mut self.package,
            DraftField::People => &mut self.people,
            DraftField::Dates => &mut self.dates,
        };
        *slot = Some(value);
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What a turn does to the draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftChange {
    #[default]
    Keep,
    Record { field: DraftField, value: String },
    Clear,
}

/// Partial changes merged into a session at the end of a turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub state: Option<SessionState>,
    pub draft: DraftChange,
}

impl SessionUpdate {
    /// Refresh the interaction time only
    pub fn touch() -> Self {
        Self::default()
    }

    pub fn to_state(state: SessionState) -> Self {
        Self {
            state: Some(state),
            draft: DraftChange::Keep,
        }
    }

    #[must_use]
    pub fn recording(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.draft = DraftChange::Record {
            field,
            value: value.into(),
        };
        self
    }

    #[must_use]
    pub fn clearing_draft(mut self) -> Self {
        self.draft = DraftChange::Clear;
        self
    }
}

/// Conversation state for one sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub sender_id: String,
    pub state: SessionState,
    pub last_interaction_at: DateTime<Utc>,
    pub draft: BookingDraft,
}

impl Session {
    pub fn new(sender_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            sender_id: sender_id.into(),
            state: SessionState::New,
            last_interaction_at: now,
            draft: BookingDraft::default(),
        }
    }

    /// Merge `update` and refresh the interaction time.
    ///
    /// Leaving the booking states always empties the draft, and the
    /// interaction time never moves backwards.
    pub fn apply(&mut self, update: SessionUpdate, now: DateTime<Utc>) {
        if let Some(state) = update.state {
            self.state = state;
        }

        match update.draft {
            DraftChange::Keep => {}
            DraftChange::Record { field, value } => self.draft.set(field, value),
            DraftChange::Clear => self.draft.clear(),
        }

        if !self.state.is_booking() {
            self.draft.clear();
        }

        self.last_interaction_at = self.last_interaction_at.max(now);
    }

    /// Whether the session has been idle for longer than `max_age`
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        now - self.last_interaction_at > max_age
    }
}
