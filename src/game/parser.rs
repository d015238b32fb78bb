//! Marker scanning over raw model output
//!
//! Turns a completion into the list of [`Directive`]s it carries. Scanning
//! never fails: text without markers simply yields no directives.

use super::marker::Marker;
use regex::Regex;
use std::sync::LazyLock;

/// Any bracketed token, e.g. `[Pop Culture]`
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("bracket pattern is valid"));

/// One state-transition rule triggered by a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `[CATEGORIES]`: host is asking for a selection; no state effect
    PromptCategories,
    /// `[CATEGORIES_SELECTED]` with the non-marker bracketed names found
    SelectCategories(Vec<String>),
    /// `[CORRECT]`
    ScoreCorrect,
    /// `[INCORRECT]`
    ScoreIncorrect,
    /// `[GAME_OVER]`
    EndGame,
    /// `[QUESTION]` with the text that follows it, `None` when that is blank
    PoseQuestion(Option<String>),
}

impl Directive {
    /// The marker that produced this directive
    pub fn marker(&self) -> Marker {
        match self {
            Directive::PromptCategories => Marker::Categories,
            Directive::SelectCategories(_) => Marker::CategoriesSelected,
            Directive::ScoreCorrect => Marker::Correct,
            Directive::ScoreIncorrect => Marker::Incorrect,
            Directive::EndGame => Marker::GameOver,
            Directive::PoseQuestion(_) => Marker::Question,
        }
    }
}

/// Markers whose literal token occurs in `text`, in rule order
pub fn markers_in(text: &str) -> Vec<Marker> {
    Marker::ALL
        .into_iter()
        .filter(|m| m.occurs_in(text))
        .collect()
}

/// Scan a completion into directives, in rule order.
///
/// Each marker contributes at most one directive however often it repeats.
pub fn scan(text: &str) -> Vec<Directive> {
    markers_in(text)
        .into_iter()
        .filter_map(|marker| match marker {
            Marker::Categories => Some(Directive::PromptCategories),
            Marker::CategoriesSelected => {
                Some(Directive::SelectCategories(bracketed_names(text)))
            }
            Marker::Correct => Some(Directive::ScoreCorrect),
            Marker::Incorrect => Some(Directive::ScoreIncorrect),
            Marker::GameOver => Some(Directive::EndGame),
            Marker::Question => Some(Directive::PoseQuestion(question_text(text))),
        })
        .collect()
}

/// Bracketed tokens that are not protocol markers, trimmed, empties dropped
fn bracketed_names(text: &str) -> Vec<String> {
    BRACKETED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty() && Marker::from_name(name).is_none())
        .map(String::from)
        .collect()
}

/// Text after the first `[QUESTION]` up to the next `[` or end of text
fn question_text(text: &str) -> Option<String> {
    let (_, rest) = text.split_once(Marker::Question.token())?;
    let question = rest.split('[').next().unwrap_or_default().trim();
    if question.is_empty() {
        None
    } else {
        Some(question.to_string())
    }
}
