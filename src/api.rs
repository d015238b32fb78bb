//! HTTP API for the trivia host

mod handlers;
mod types;

pub use handlers::create_router;

use crate::llm::LlmService;
use crate::session::Orchestrator;
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Holds no game data: every game state travels with its request.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self {
            orchestrator: Orchestrator::new(llm),
        }
    }
}
