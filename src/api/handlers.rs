//! HTTP request handlers

use super::signature::{signed_url, SIGNATURE_HEADER};
use super::types::{ErrorResponse, HealthResponse, SuccessResponse, WebhookEvent};
use super::AppState;
use crate::conversation::InboundMessage;
use crate::delivery::{preview, OutboundReply};
use crate::session::SessionStore;
use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

const LOG_PREVIEW_CHARS: usize = 100;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(receive_message))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Webhook
// ============================================================

async fn receive_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Form(params): Form<Vec<(String, String)>>,
) -> Result<Json<SuccessResponse>, AppError> {
    if let Some(verifier) = &state.verifier {
        let url = signed_url(&headers, &uri, state.public_url.as_deref());
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());

        if let Err(e) = verifier.verify(&url, &params, signature) {
            tracing::warn!(error = %e, url = %url, "Invalid webhook signature");
            return Err(AppError::Forbidden);
        }
    }

    let event = WebhookEvent::from_params(&params);
    let (Some(from), Some(body)) = (event.from, event.body) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    tracing::info!(sender = %from, body = %body, "Received message");

    let message = InboundMessage::new(from, body);
    let reply = state.engine.respond(&message, Utc::now());

    let outbound = OutboundReply {
        to: message.sender_id,
        from: event.to.unwrap_or_default(),
        body: reply,
    };

    if let Err(e) = state.sender.send(&outbound).await {
        tracing::error!(
            error = %e,
            sender = state.sender.name(),
            to = %outbound.to,
            "Failed to deliver reply"
        );
        return Err(AppError::Internal("Internal server error".to_string()));
    }

    tracing::info!(
        to = %outbound.to,
        reply = %preview(&outbound.body, LOG_PREVIEW_CHARS),
        "Sent response"
    );

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Health & Version
// ============================================================

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.engine.store().len(),
    })
}

async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Forbidden,
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SignatureVerifier;
    use crate::conversation::{replies, ConversationEngine};
    use crate::delivery::{DeliveryError, ReplySender};
    use crate::session::{InMemorySessionStore, SessionState};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<OutboundReply>>,
    }

    #[async_trait]
    impl ReplySender for RecordingSender {
        async fn send(&self, reply: &OutboundReply) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push(reply.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingSender;

    #[async_trait]
    impl ReplySender for FailingSender {
        async fn send(&self, _reply: &OutboundReply) -> Result<(), DeliveryError> {
            Err(DeliveryError::Rejected {
                status: 401,
                body: "Authenticate".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn state_with(sender: Arc<dyn ReplySender>, verifier: Option<SignatureVerifier>) -> AppState {
        let engine = Arc::new(ConversationEngine::new(Arc::new(
            InMemorySessionStore::new(),
        )));
        AppState::new(engine, sender, verifier, None)
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header(header::HOST, "bot.example.com")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_webhook_replies_to_sender() {
        let sender = Arc::new(RecordingSender::default());
        let state = state_with(sender.clone(), None);
        let app = create_router(state.clone());

        let response = app
            .oneshot(form_request(
                "From=whatsapp%3A%2B1555&To=whatsapp%3A%2B1000&Body=%20hi%20",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["success"], true);

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "whatsapp:+1555");
        assert_eq!(sent[0].from, "whatsapp:+1000");
        assert_eq!(sent[0].body, replies::WELCOME);

        let session = state
            .engine
            .store()
            .get_or_create("whatsapp:+1555", Utc::now());
        assert_eq!(session.state, SessionState::Menu);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_before_engine() {
        let sender = Arc::new(RecordingSender::default());
        let state = state_with(sender.clone(), None);

        for body in ["From=%2B1555&Body=%20%20", "Body=hi", ""] {
            let response = create_router(state.clone())
                .oneshot(form_request(body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["error"], "Missing required fields");
        }

        assert!(sender.sent.lock().unwrap().is_empty());
        assert_eq!(state.engine.store().len(), 0);
    }

    #[tokio::test]
    async fn test_signature_enforced_when_configured() {
        let sender = Arc::new(RecordingSender::default());
        let state = state_with(sender.clone(), Some(SignatureVerifier::new("token")));

        let unsigned = create_router(state.clone())
            .oneshot(form_request("From=%2B1555&Body=hi"))
            .await
            .unwrap();
        assert_eq!(unsigned.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(unsigned).await["error"], "Forbidden");

        let params = vec![
            ("From".to_string(), "+1555".to_string()),
            ("Body".to_string(), "hi".to_string()),
        ];
        let signature = SignatureVerifier::new("token")
            .sign("https://bot.example.com/webhook", &params)
            .unwrap();

        let mut request = form_request("From=%2B1555&Body=hi");
        request
            .headers_mut()
            .insert(SIGNATURE_HEADER, signature.parse().unwrap());
        let signed = create_router(state).oneshot(request).await.unwrap();

        assert_eq!(signed.status(), StatusCode::OK);
        assert_eq!(sender.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_internal_error() {
        let state = state_with(Arc::new(FailingSender), None);
        let response = create_router(state.clone())
            .oneshot(form_request("From=%2B1555&Body=book"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Internal server error");

        // The turn already happened; the next message continues from it
        let session = state.engine.store().get_or_create("+1555", Utc::now());
        assert_eq!(session.state, SessionState::BookingName);
    }

    #[tokio::test]
    async fn test_webhook_rejects_get() {
        let state = state_with(Arc::new(RecordingSender::default()), None);
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_reports_session_count() {
        let state = state_with(Arc::new(RecordingSender::default()), None);
        state
            .engine
            .respond(&InboundMessage::new("+1555", "hi"), Utc::now());

        let response = create_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 1);
    }
}
