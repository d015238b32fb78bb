//! API request and response types

use crate::game::GameState;
use serde::{Deserialize, Serialize};

/// Request to play one turn
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub message: String,
    pub state: GameState,
}

/// Display text plus the state the client must send back next turn
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub display_text: String,
    pub state: GameState,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Error response for a turn the model could not complete.
///
/// Carries the unchanged state so the client can retry the same turn.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnFailedResponse {
    pub error: String,
    pub display_text: String,
    pub state: GameState,
}

/// Response for the version endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub protocol_version: u32,
    pub model: String,
}
