//! # HTTP API
//!
//! `POST /api/chat` and `GET /health`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod error;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::chat_handler::ChatHandler;

pub use error::ApiError;

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";
/// Chat endpoint path.
pub const CHAT_PATH: &str = "/api/chat";

#[derive(Clone)]
pub struct AppState {
    pub handler: ChatHandler,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: String,
}

/// Build the full application router with permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(CHAT_PATH, post(chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Pull `message` out of a request body, treating anything unusable as empty
///
/// Missing bodies, non-JSON bodies, non-object JSON and non-string `message`
/// values all yield an empty message.
pub fn parse_message(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string(),
        Err(e) => {
            warn!("Ignoring malformed chat body: {e}");
            String::new()
        }
    }
}

async fn chat(State(st): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let message = parse_message(&body);

    st.handler
        .handle_message_with_id(&message, request_id)
        .await
        .map(|reply| Json(ChatResponse { reply }))
        .map_err(|e| {
            error!("[{request_id}] ❌ Chat request failed: {e}");
            ApiError::from(e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandContext, CommandDispatcher};
    use crate::core::ManualClock;
    use crate::features::chat::LanguageModel;
    use crate::features::launcher::RecordingLauncher;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::{Duration, Local, TimeZone};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct CannedModel(Option<&'static str>);

    #[async_trait]
    impl LanguageModel for CannedModel {
        async fn complete(&self, _prompt: &str, _request_id: Uuid) -> anyhow::Result<String> {
            match self.0 {
                Some(text) => Ok(text.to_string()),
                None => Err(anyhow::anyhow!("upstream unavailable")),
            }
        }
    }

    fn app(model: CannedModel) -> (Router, ManualClock) {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 5, 1, 14, 5, 0).unwrap());
        let context = CommandContext {
            clock: Arc::new(clock.clone()),
            launcher: Arc::new(RecordingLauncher::new()),
            ..CommandContext::default()
        };
        let handler = ChatHandler::new(CommandDispatcher::new(context), Arc::new(model));
        (router(AppState { handler }), clock)
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(CHAT_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(CannedModel(Some("x")));
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(HEALTH_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chat_time_command() {
        let (app, _) = app(CannedModel(Some("unused")));
        let (status, body) = send(&app, post_chat(r#"{"message": "what time is it"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "reply": "The time is 14:05" }));
    }

    #[tokio::test]
    async fn test_chat_defers_to_model() {
        let (app, _) = app(CannedModel(Some("Why did...")));
        let (status, body) = send(&app, post_chat(r#"{"message": "tell me a joke"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Why did...");
    }

    #[tokio::test]
    async fn test_missing_message_is_empty_string() {
        let (app, _) = app(CannedModel(Some("empty prompt reply")));

        let (status, body) = send(&app, post_chat("{}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "empty prompt reply");

        let (status, _) = send(&app, post_chat("not json at all")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reminder_across_requests() {
        let (app, clock) = app(CannedModel(Some("Sure.")));

        let (_, first) = send(&app, post_chat(r#"{"message": "remind me"}"#)).await;
        assert_eq!(first["reply"], "Okay, I’ll remind you in 10 seconds.");

        clock.advance(Duration::seconds(11));
        let (_, second) = send(&app, post_chat(r#"{"message": "hi"}"#)).await;
        let reply = second["reply"].as_str().unwrap();
        assert!(reply.ends_with(" Reminder: Don't forget!"));
    }

    #[tokio::test]
    async fn test_model_failure_is_server_error() {
        let (app, _) = app(CannedModel(None));
        let (status, body) = send(&app, post_chat(r#"{"message": "tell me a joke"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("upstream unavailable"));
    }

    #[test]
    fn test_parse_message_variants() {
        assert_eq!(parse_message(br#"{"message": "hi"}"#), "hi");
        assert_eq!(parse_message(br#"{"message": 42}"#), "");
        assert_eq!(parse_message(br#"["message"]"#), "");
        assert_eq!(parse_message(b""), "");
        assert_eq!(parse_message(b"{"), "");
    }
}
