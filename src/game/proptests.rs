//! Property-based tests for the protocol parser
//!
//! These tests verify the game invariants hold for every completion the
//! model could send, including ones that ignore the formatting contract.

use super::marker::{Marker, MAX_DIFFICULTY, MAX_REWARDS, REWARD_POOL};
use super::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_last_answer() -> impl Strategy<Value = LastAnswer> {
    prop_oneof![
        Just(LastAnswer::Correct),
        Just(LastAnswer::Incorrect),
        Just(LastAnswer::None),
    ]
}

fn arb_categories() -> impl Strategy<Value = BTreeSet<String>> {
    prop_oneof![
        Just(BTreeSet::new()),
        proptest::collection::btree_set("[A-Z][a-z]{2,10}", 6),
    ]
}

/// States this server could have produced
fn arb_valid_state() -> impl Strategy<Value = GameState> {
    (
        0..=MAX_REWARDS,
        0u32..10,
        1..=MAX_DIFFICULTY,
        arb_categories(),
        proptest::option::of("[A-Za-z ?]{1,40}"),
        any::<bool>(),
        arb_last_answer(),
    )
        .prop_map(
            |(rewards, bonus, difficulty, categories, current_question, over, last_answer)| {
                GameState {
                    score: u32::try_from(rewards).unwrap_or(0) + bonus,
                    emojis: REWARD_POOL[..rewards]
                        .iter()
                        .map(|e| (*e).to_string())
                        .collect(),
                    game_started: !categories.is_empty(),
                    categories,
                    current_question,
                    difficulty,
                    is_game_over: over || rewards == MAX_REWARDS,
                    last_answer,
                }
            },
        )
}

fn arb_marker_token() -> impl Strategy<Value = String> {
    proptest::sample::select(Marker::ALL.to_vec()).prop_map(|m| m.token().to_string())
}

/// Text with no protocol marker: no brackets, or only lowercase bracketed words
fn arb_markerless_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,?!']{0,80}",
        proptest::collection::vec(
            prop_oneof!["[a-zA-Z ,.?]{0,20}", "\\[[a-z ]{1,12}\\]"],
            0..6
        )
        .prop_map(|parts| parts.join(" ")),
    ]
}

/// Completion mixing marker tokens, bracketed names and prose
fn arb_completion() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            3 => arb_marker_token(),
            2 => "\\[[A-Za-z ]{0,12}\\]",
            3 => "[a-zA-Z0-9 .,?!🎉]{0,30}",
            1 => Just("[".to_string()),
            1 => Just("]".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_markerless_text_is_identity(state in arb_valid_state(), text in arb_markerless_text()) {
        prop_assert_eq!(parse(&text, &state), state);
    }

    #[test]
    fn prop_game_over_is_monotonic(state in arb_valid_state(), text in arb_completion()) {
        let over = GameState { is_game_over: true, ..state };
        prop_assert!(parse(&text, &over).is_game_over);
    }

    #[test]
    fn prop_bounds_hold(state in arb_valid_state(), text in arb_completion()) {
        let next = parse(&text, &state);
        prop_assert!(next.emojis.len() <= MAX_REWARDS);
        prop_assert!(next.difficulty <= MAX_DIFFICULTY);
    }

    #[test]
    fn prop_valid_state_stays_valid(state in arb_valid_state(), text in arb_completion()) {
        let next = parse(&text, &state);
        prop_assert_eq!(next.validate(), Ok(()));
    }

    #[test]
    fn prop_progress_is_append_only(state in arb_valid_state(), text in arb_completion()) {
        let next = parse(&text, &state);
        prop_assert!(next.emojis.starts_with(&state.emojis));
        prop_assert!(next.difficulty >= state.difficulty);
        prop_assert!(next.score >= state.score);
        prop_assert!(next.score - state.score <= 1);
        prop_assert!(next.emojis.len() - state.emojis.len() <= 1);
    }

    #[test]
    fn prop_categories_fixed_once_started(state in arb_valid_state(), text in arb_completion()) {
        let next = parse(&text, &state);
        if state.game_started {
            prop_assert_eq!(&next.categories, &state.categories);
            prop_assert!(next.game_started);
        }
    }

    #[test]
    fn prop_correct_at_full_rewards_scores_once(
        state in arb_valid_state(),
        prose in "[a-zA-Z .!]{0,30}",
    ) {
        let full = GameState {
            score: state.score.max(5),
            emojis: REWARD_POOL.iter().map(|e| (*e).to_string()).collect(),
            is_game_over: true,
            ..state
        };
        let next = parse(&format!("[CORRECT]{prose}"), &full);
        prop_assert_eq!(next.emojis.len(), MAX_REWARDS);
        prop_assert_eq!(next.score, full.score + 1);
    }

    #[test]
    fn prop_no_marker_leaks_into_categories(text in arb_completion()) {
        let next = parse(&text, &GameState::default());
        for marker in Marker::ALL {
            prop_assert!(!next.categories.contains(marker.name()));
        }
    }

    #[test]
    fn prop_question_has_no_marker_or_padding(text in arb_completion()) {
        let next = parse(&text, &GameState::default());
        if let Some(question) = next.current_question {
            prop_assert!(!question.is_empty());
            prop_assert_eq!(question.trim(), question.as_str());
            for marker in Marker::ALL {
                prop_assert!(!marker.occurs_in(&question));
            }
        }
    }
}
