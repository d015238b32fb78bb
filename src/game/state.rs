//! Game state types

use super::marker::{MAX_DIFFICULTY, MAX_REWARDS, MIN_DIFFICULTY, REQUIRED_CATEGORIES, REWARD_POOL};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Verdict on the most recently scored answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastAnswer {
    Correct,
    Incorrect,
    #[default]
    None,
}

/// Complete snapshot of one player's game.
///
/// Owned by the client and round-tripped with every request; the server
/// never keeps a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub score: u32,
    pub emojis: Vec<String>,
    pub categories: BTreeSet<String>,
    pub game_started: bool,
    pub current_question: Option<String>,
    pub difficulty: u8,
    pub is_game_over: bool,
    #[serde(deserialize_with = "null_as_none")]
    pub last_answer: LastAnswer,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            emojis: Vec::new(),
            categories: BTreeSet::new(),
            game_started: false,
            current_question: None,
            difficulty: MIN_DIFFICULTY,
            is_game_over: false,
            last_answer: LastAnswer::None,
        }
    }
}

/// Reasons a client-supplied state is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("too many rewards: {0} (at most {max})", max = MAX_REWARDS)]
    TooManyRewards(usize),
    #[error("rewards are not a prefix of the reward pool")]
    ForeignReward,
    #[error("difficulty {0} outside {min}..={max}", min = MIN_DIFFICULTY, max = MAX_DIFFICULTY)]
    DifficultyOutOfRange(u8),
    #[error("expected 0 or {required} categories, got {0}", required = REQUIRED_CATEGORIES)]
    CategoryCount(usize),
    #[error("gameStarted does not match category selection")]
    StartedMismatch,
    #[error("score {score} is below reward count {rewards}")]
    ScoreBelowRewards { score: u32, rewards: usize },
    #[error("all rewards collected but game is not over")]
    UnfinishedVictory,
}

impl GameState {
    /// Check that a state could have been produced by this server.
    ///
    /// Every state returned by the parser passes; a state that fails was
    /// built or edited by the client and must not reach the parser.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.emojis.len() > MAX_REWARDS {
            return Err(StateError::TooManyRewards(self.emojis.len()));
        }
        if !self
            .emojis
            .iter()
            .zip(REWARD_POOL)
            .all(|(held, expected)| held == expected)
        {
            return Err(StateError::ForeignReward);
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(StateError::DifficultyOutOfRange(self.difficulty));
        }
        let count = self.categories.len();
        if count != 0 && count != REQUIRED_CATEGORIES {
            return Err(StateError::CategoryCount(count));
        }
        if self.game_started == self.categories.is_empty() {
            return Err(StateError::StartedMismatch);
        }
        let rewards = self.emojis.len();
        if (self.score as usize) < rewards {
            return Err(StateError::ScoreBelowRewards {
                score: self.score,
                rewards,
            });
        }
        if self.has_all_rewards() && !self.is_game_over {
            return Err(StateError::UnfinishedVictory);
        }
        Ok(())
    }

    /// Whether the player has collected every reward
    pub fn has_all_rewards(&self) -> bool {
        self.emojis.len() >= MAX_REWARDS
    }
}

fn null_as_none<'de, D>(deserializer: D) -> Result<LastAnswer, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LastAnswer>::deserialize(deserializer)?.unwrap_or_default())
}
