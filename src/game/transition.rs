//! Pure state transition rules
//!
//! Every directive maps to exactly one rule. All rules that fire are applied
//! to a single derived copy of the incoming state; the input is never
//! mutated, so callers can diff old against new.

use super::marker::{MAX_DIFFICULTY, REQUIRED_CATEGORIES, REWARD_POOL};
use super::parser::{markers_in, scan, Directive};
use super::state::{GameState, LastAnswer};
use super::Marker;
use std::collections::BTreeSet;
use thiserror::Error;

/// Why a category selection was not committed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryRejection {
    #[error("expected {required} distinct categories, found {0}", required = REQUIRED_CATEGORIES)]
    WrongCount(usize),
    #[error("categories were already chosen")]
    AlreadySelected,
}

/// Outcome of parsing one completion
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub state: GameState,
    /// Markers whose token occurred in the text
    pub markers: Vec<Marker>,
    /// Directives that were applied
    pub directives: Vec<Directive>,
    /// Set when a category selection was present but not committed
    pub category_rejection: Option<CategoryRejection>,
}

impl ParseReport {
    /// Whether the completion carried no protocol marker at all
    pub fn is_protocol_mismatch(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Parse a completion against the previous state.
///
/// Total: any input yields a valid state. Text without markers returns an
/// identical copy of `state`.
#[allow(dead_code)] // The server logs from parse_report
pub fn parse(text: &str, state: &GameState) -> GameState {
    parse_report(text, state).state
}

/// Like [`parse`], but also reports what was recognised
pub fn parse_report(text: &str, state: &GameState) -> ParseReport {
    let markers = markers_in(text);
    let directives = scan(text);
    let mut next = state.clone();
    let mut category_rejection = None;

    if directives.is_empty() {
        return ParseReport {
            state: next,
            markers,
            directives,
            category_rejection,
        };
    }

    for directive in &directives {
        if let Err(rejection) = apply(&mut next, directive) {
            category_rejection = Some(rejection);
        }
    }

    // A full reward row ends the game even without an explicit marker,
    // including when the last reward was earned in this very completion.
    if next.has_all_rewards() {
        next.is_game_over = true;
    }

    ParseReport {
        state: next,
        markers,
        directives,
        category_rejection,
    }
}

fn apply(state: &mut GameState, directive: &Directive) -> Result<(), CategoryRejection> {
    match directive {
        Directive::PromptCategories => {}
        Directive::SelectCategories(names) => select_categories(state, names)?,
        Directive::ScoreCorrect => {
            state.score = state.score.saturating_add(1);
            if let Some(reward) = REWARD_POOL.get(state.emojis.len()) {
                state.emojis.push((*reward).to_string());
            }
            raise_difficulty(state);
            state.last_answer = LastAnswer::Correct;
            state.current_question = None;
        }
        Directive::ScoreIncorrect => {
            raise_difficulty(state);
            state.last_answer = LastAnswer::Incorrect;
            state.current_question = None;
        }
        Directive::EndGame => state.is_game_over = true,
        Directive::PoseQuestion(question) => {
            state.current_question.clone_from(question);
            state.last_answer = LastAnswer::None;
        }
    }
    Ok(())
}

fn select_categories(state: &mut GameState, names: &[String]) -> Result<(), CategoryRejection> {
    if state.game_started {
        return Err(CategoryRejection::AlreadySelected);
    }
    let chosen: BTreeSet<String> = names.iter().cloned().collect();
    if chosen.len() != REQUIRED_CATEGORIES {
        return Err(CategoryRejection::WrongCount(chosen.len()));
    }
    state.categories = chosen;
    state.game_started = true;
    Ok(())
}

fn raise_difficulty(state: &mut GameState) {
    state.difficulty = state.difficulty.saturating_add(1).min(MAX_DIFFICULTY);
}
