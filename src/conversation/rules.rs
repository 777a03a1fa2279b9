//! Keyword classification for messages outside the booking flow
//!
//! Rules are tried top to bottom against the lower-cased, trimmed body and
//! the first rule with a matching keyword wins.

use super::replies;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Packages,
    Booking,
    Locations,
    Pricing,
    Support,
    Mountain,
    Camping,
    Water,
    Emergency,
}

/// One row of the classification table
#[derive(Debug)]
pub struct Rule {
    pub topic: Topic,
    /// Substrings that select this rule
    pub keywords: &'static [&'static str],
    /// State to move to, `None` keeps the current one
    pub next_state: Option<SessionState>,
    pub reply: &'static str,
}

impl Rule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

// Numbered menu choices sit with their keywords, so "2" and "book" are the
// same rule. A message containing both a digit and another rule's keyword
// goes to whichever rule comes first here.
pub const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Greeting,
        keywords: &["hi", "hello", "start"],
        next_state: Some(SessionState::Menu),
        reply: replies::WELCOME,
    },
    Rule {
        topic: Topic::Packages,
        keywords: &["1", "package", "adventure"],
        next_state: None,
        reply: replies::PACKAGES,
    },
    Rule {
        topic: Topic::Booking,
        keywords: &["2", "book", "reserve"],
        next_state: Some(SessionState::BookingName),
        reply: replies::BOOKING_START,
    },
    Rule {
        topic: Topic::Locations,
        keywords: &["3", "location", "where"],
        next_state: None,
        reply: replies::LOCATIONS,
    },
    Rule {
        topic: Topic::Pricing,
        keywords: &["4", "price", "cost"],
        next_state: None,
        reply: replies::PRICING,
    },
    Rule {
        topic: Topic::Support,
        keywords: &["5", "support", "help", "contact"],
        next_state: None,
        reply: replies::SUPPORT,
    },
    Rule {
        topic: Topic::Mountain,
        keywords: &["mountain", "trek"],
        next_state: None,
        reply: replies::MOUNTAIN,
    },
    Rule {
        topic: Topic::Camping,
        keywords: &["camp"],
        next_state: None,
        reply: replies::CAMPING,
    },
    Rule {
        topic: Topic::Water,
        keywords: &["water", "raft", "kayak"],
        next_state: None,
        reply: replies::WATER,
    },
    Rule {
        topic: Topic::Emergency,
        keywords: &["emergency", "urgent"],
        next_state: None,
        reply: replies::EMERGENCY,
    },
];

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// First rule matching `text`, if any
pub fn classify(text: &str) -> Option<&'static Rule> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }
    RULES.iter().find(|rule| rule.matches(&normalized))
}
