//! HTTP request handlers

use super::types::{
    ErrorResponse, SessionResponse, TurnFailedResponse, TurnRequest, VersionResponse,
};
use super::AppState;
use crate::game::{GameState, PROTOCOL_VERSION};
use crate::session::{Orchestrator, SessionError, COLLABORATOR_PLACEHOLDER};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/session/start", post(start_session))
        .route("/session/turn", post(play_turn))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Session
// ============================================================

async fn start_session() -> Json<SessionResponse> {
    let outcome = Orchestrator::start();
    Json(SessionResponse {
        display_text: outcome.display_text,
        state: outcome.state,
    })
}

async fn play_turn(
    State(state): State<AppState>,
    payload: Result<Json<TurnRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match state.orchestrator.handle_turn(&req.message, &req.state).await {
        Ok(outcome) => Ok(Json(SessionResponse {
            display_text: outcome.display_text,
            state: outcome.state,
        })),
        Err(e) if e.is_client_error() => Err(AppError::BadRequest(e.to_string())),
        Err(e) => Err(AppError::TurnFailed {
            error: e,
            state: req.state,
        }),
    }
}

// ============================================================
// Version
// ============================================================

async fn get_version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        protocol_version: PROTOCOL_VERSION,
        model: state.orchestrator.model_id().to_string(),
    })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    /// The collaborator failed; the client keeps its state and retries
    TurnFailed {
        error: SessionError,
        state: GameState,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            AppError::TurnFailed { error, state } => {
                let body = Json(TurnFailedResponse {
                    error: error.to_string(),
                    display_text: COLLABORATOR_PLACEHOLDER.to_string(),
                    state,
                });
                (StatusCode::BAD_GATEWAY, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockLlmService;
    use crate::llm::LlmError;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> (Router, Arc<MockLlmService>) {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        (create_router(AppState::new(mock.clone())), mock)
    }

    async fn post_json(router: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_start_session() {
        let (router, mock) = router();
        let (status, body) = post_json(router, "/session/start", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["displayText"],
            "[CATEGORIES] Pick 6 categories from: History, Science, Pop Culture, Geography, Sports, Literature"
        );
        assert_eq!(body["state"]["difficulty"], 1);
        assert_eq!(body["state"]["lastAnswer"], "none");
        assert!(mock.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_turn_returns_parsed_state() {
        let (router, mock) = router();
        mock.queue_text("[INCORRECT] wrong, it was Paris.");
        let request = json!({
            "message": "Lyon",
            "state": {
                "score": 0, "emojis": [], "categories": [], "gameStarted": false,
                "currentQuestion": "Capital of France?", "difficulty": 2,
                "isGameOver": false, "lastAnswer": null
            }
        });

        let (status, body) = post_json(router, "/session/turn", &request.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["displayText"], "[INCORRECT] wrong, it was Paris.");
        assert_eq!(body["state"]["difficulty"], 3);
        assert_eq!(body["state"]["lastAnswer"], "incorrect");
        assert_eq!(body["state"]["currentQuestion"], Value::Null);
        assert_eq!(body["state"]["score"], 0);
    }

    #[tokio::test]
    async fn test_empty_message_is_bad_request() {
        let (router, mock) = router();
        let request = json!({ "message": "   ", "state": {} });

        let (status, body) = post_json(router, "/session/turn", &request.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "message must not be empty");
        assert!(mock.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_message_is_bad_request() {
        let (router, _mock) = router();
        let (status, _) = post_json(router, "/session/turn", r#"{ "state": {} }"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (router, _mock) = router();
        let (status, body) = post_json(router, "/session/turn", "{ not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_state_is_bad_request() {
        let (router, mock) = router();
        let request = json!({ "message": "Paris", "state": { "emojis": ["🍕"], "score": 1 } });

        let (status, _) = post_json(router, "/session/turn", &request.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(mock.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_collaborator_failure_returns_unchanged_state() {
        let (router, mock) = router();
        mock.queue_error(LlmError::server_error("overloaded"));
        let state = json!({
            "score": 2, "emojis": ["🌟", "🏆"], "categories": [], "gameStarted": false,
            "currentQuestion": "Who wrote Hamlet?", "difficulty": 3,
            "isGameOver": false, "lastAnswer": "correct"
        });
        let request = json!({ "message": "Shakespeare", "state": state });

        let (status, body) = post_json(router, "/session/turn", &request.to_string()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["displayText"], COLLABORATOR_PLACEHOLDER);
        assert_eq!(body["state"], state);
        assert!(body["error"].as_str().unwrap().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_version_reports_protocol() {
        let (router, _mock) = router();
        let response = router
            .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["name"], "trivia_host");
        assert_eq!(body["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(body["model"], "mock-model");
    }
}
