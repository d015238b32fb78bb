//! Stateless session orchestration
//!
//! One turn: validate the client's state and message, ask the model, parse
//! its reply into the next state. Nothing is kept between calls; the caller
//! must wait for a turn to finish before sending the next one, since two
//! turns sent with the same state are parsed independently.

use crate::game::{parse_report, Directive, GameState, StateError};
use crate::llm::{LlmError, LlmRequest, LlmService, MessageRole};
use crate::system_prompt::{category_prompt, SYSTEM_PROMPT};
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// Shown to the player when the model could not be reached
pub const COLLABORATOR_PLACEHOLDER: &str = "Oops! The trivia master is taking a nap. Try again.";

/// Cap on reply length; a host line plus one question fits easily
const MAX_REPLY_TOKENS: u32 = 1024;

/// Text to display and the state to hand back to the client
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub display_text: String,
    pub state: GameState,
}

/// Errors that end a turn without consuming it
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("invalid game state: {0}")]
    InvalidState(#[from] StateError),
    #[error("trivia host unavailable: {0}")]
    Collaborator(#[from] LlmError),
}

impl SessionError {
    /// Whether the client sent something unusable, as opposed to an upstream failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyMessage | Self::InvalidState(_))
    }
}

/// Runs turns against a chat-completion collaborator
#[derive(Clone)]
pub struct Orchestrator {
    llm: Arc<dyn LlmService>,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Open a new game without calling the model
    pub fn start() -> TurnOutcome {
        TurnOutcome {
            display_text: category_prompt(),
            state: GameState::default(),
        }
    }

    /// Play one turn.
    ///
    /// On error the caller still owns `state` unchanged and may retry the
    /// same turn.
    pub async fn handle_turn(
        &self,
        message: &str,
        state: &GameState,
    ) -> Result<TurnOutcome, SessionError> {
        let turn_id = uuid::Uuid::new_v4();
        self.run_turn(message, state)
            .instrument(tracing::info_span!("turn", %turn_id))
            .await
    }

    async fn run_turn(&self, message: &str, state: &GameState) -> Result<TurnOutcome, SessionError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        state.validate()?;

        let request = build_request(message, state);
        let response = self.llm.complete(&request).await?;

        let report = parse_report(&response.text, state);
        if report.is_protocol_mismatch() {
            tracing::warn!(
                chars = response.text.chars().count(),
                "Completion carried no protocol marker; state unchanged"
            );
        }
        if let Some(rejection) = &report.category_rejection {
            tracing::warn!(reason = %rejection, "Category selection not committed");
        }
        let applied: Vec<_> = report.directives.iter().map(Directive::marker).collect();
        tracing::info!(
            markers = ?report.markers,
            applied = ?applied,
            score = report.state.score,
            difficulty = report.state.difficulty,
            game_over = report.state.is_game_over,
            "Turn parsed"
        );

        Ok(TurnOutcome {
            display_text: response.text,
            state: report.state,
        })
    }
}

/// System prompt, the pending question as assistant context, then the player
fn build_request(message: &str, state: &GameState) -> LlmRequest {
    let request = LlmRequest::new(SYSTEM_PROMPT).with_max_tokens(MAX_REPLY_TOKENS);
    let request = match state.current_question.as_deref() {
        Some(question) => request.with_message(MessageRole::Assistant, question),
        None => request,
    };
    request.with_message(MessageRole::User, message)
}
