//! Property-based tests for the conversation engine
//!
//! These tests verify key invariants hold across arbitrary message texts.

use super::rules::RULES;
use super::*;
use crate::session::{InMemorySessionStore, Session, SessionState};
use chrono::{Duration, TimeZone};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn t0() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_710_000_000_000).unwrap()
}

fn new_engine() -> ConversationEngine<InMemorySessionStore> {
    ConversationEngine::new(Arc::new(InMemorySessionStore::new()))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Free text with at least one visible character
fn arb_answer() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ,.+-]{0,24}".prop_map(|s| s.trim().to_string())
}

fn arb_any_text() -> impl Strategy<Value = String> {
    "[ A-Za-z0-9?!]{0,30}"
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop::sample::select(SessionState::ALL.to_vec())
}

fn arb_keyword() -> impl Strategy<Value = &'static str> {
    prop::sample::select(
        RULES
            .iter()
            .flat_map(|rule| rule.keywords.iter().copied())
            .collect::<Vec<_>>(),
    )
}

fn booking_path() -> [SessionState; 5] {
    [
        SessionState::BookingContact,
        SessionState::BookingPackage,
        SessionState::BookingPeople,
        SessionState::BookingDates,
        SessionState::New,
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: five answers walk the booking flow one step at a time and
    // the confirmation repeats every answer verbatim
    #[test]
    fn prop_booking_flow_collects_every_answer(
        answers in proptest::collection::vec(arb_answer(), 5),
        offset_ms in 0i64..1_000_000,
    ) {
        prop_assume!(answers.iter().all(|a| !a.is_empty()));

        let engine = new_engine();
        let sender = "+1555";
        let now = t0() + Duration::milliseconds(offset_ms);
        engine.respond(&InboundMessage::new(sender, "book"), now);

        let mut reply = String::new();
        for (answer, expected) in answers.iter().zip(booking_path()) {
            reply = engine.respond(&InboundMessage::new(sender, answer.as_str()), now);
            let state = engine.store().get_or_create(sender, now).state;
            prop_assert_eq!(state, expected);
        }

        for answer in &answers {
            prop_assert!(reply.contains(answer.as_str()), "confirmation missing {:?}", answer);
        }
        prop_assert!(reply.contains(&reference_code(now)));
        prop_assert!(engine.store().get_or_create(sender, now).draft.is_empty());
    }

    // Invariant 2: non-booking replies carry no hidden state
    #[test]
    fn prop_keyword_replies_are_repeatable(keyword in arb_keyword()) {
        let engine = new_engine();
        let sender = "+1555";
        engine.respond(&InboundMessage::new(sender, "hi"), t0());

        // The booking keyword leaves the menu, so compare against a fresh
        // menu-state session each time.
        let first = engine.respond(&InboundMessage::new(sender, keyword), t0());
        let other = new_engine();
        other.respond(&InboundMessage::new(sender, "hi"), t0());
        let second = other.respond(&InboundMessage::new(sender, keyword), t0());
        prop_assert_eq!(&first, &second);

        if !engine.store().get_or_create(sender, t0()).state.is_booking() {
            let third = engine.respond(&InboundMessage::new(sender, keyword), t0());
            prop_assert_eq!(&first, &third);
        }
    }

    // Invariant 3: the draft is empty whenever the session is outside the
    // booking flow
    #[test]
    fn prop_draft_only_populated_while_booking(
        messages in proptest::collection::vec(arb_any_text(), 0..20),
    ) {
        let engine = new_engine();
        let sender = "+1555";
        for text in &messages {
            engine.respond(&InboundMessage::new(sender, text.as_str()), t0());
            let session = engine.store().get_or_create(sender, t0());
            if !session.state.is_booking() {
                prop_assert!(session.draft.is_empty(), "draft leaked in {}", session.state);
            }
        }
    }

    // Invariant 4: every turn leaves the interaction time at the latest
    // timestamp seen
    #[test]
    fn prop_interaction_time_monotonic(
        offsets in proptest::collection::vec(-10_000i64..10_000, 1..10),
        text in arb_any_text(),
    ) {
        let engine = new_engine();
        let sender = "+1555";
        let mut latest: Option<DateTime<Utc>> = None;
        for offset in offsets {
            let now = t0() + Duration::seconds(offset);
            engine.respond(&InboundMessage::new(sender, text.as_str()), now);
            let stamp = engine.store().get_or_create(sender, now).last_interaction_at;
            let expected = latest.map_or(now, |l| l.max(now));
            prop_assert_eq!(stamp, expected);
            latest = Some(expected);
        }
    }

    // Invariant 5: the pure transition never panics and only ever proposes a
    // known state
    #[test]
    fn prop_transition_total(state in arb_state(), text in arb_any_text()) {
        let mut session = Session::new("+1555", t0());
        session.state = state;
        let turn = transition(&session, &text, t0());
        prop_assert!(!turn.reply.is_empty());
        if let Some(next) = turn.update.state {
            prop_assert!(SessionState::ALL.contains(&next));
        }
    }

    // Invariant 6: sweeping keeps sessions touched within the window
    #[test]
    fn prop_sweep_respects_window(
        ages in proptest::collection::vec(0i64..200, 1..20),
        max_age in 1i64..200,
    ) {
        let store = InMemorySessionStore::new();
        let now = t0() + Duration::seconds(1_000);
        for (i, age) in ages.iter().enumerate() {
            store.get_or_create(&format!("s{i}"), now - Duration::seconds(*age));
        }

        let stale = ages.iter().filter(|age| **age > max_age).count();
        let evicted = store.sweep(now, Duration::seconds(max_age));
        prop_assert_eq!(evicted, stale);
        prop_assert_eq!(store.len(), ages.len() - stale);
    }
}
