//! Adventure Concierge - messaging webhook bot
//!
//! Answers inbound chat messages from a keyword menu and walks senders
//! through a booking request, keeping per-sender state in memory.

mod api;
mod config;
mod conversation;
mod delivery;
mod session;
mod sweeper;

use api::{create_router, AppState, SignatureVerifier};
use config::Config;
use conversation::ConversationEngine;
use delivery::{LogSender, ReplySender, TwilioSender};
use session::InMemorySessionStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adventure_concierge=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    let store = Arc::new(InMemorySessionStore::new());
    let engine = Arc::new(ConversationEngine::new(Arc::clone(&store)));

    let sender: Arc<dyn ReplySender> = match config.twilio_credentials() {
        Some((sid, token)) => Arc::new(TwilioSender::new(
            sid.to_string(),
            token.to_string(),
            &config.twilio_api_base,
        )),
        None => {
            tracing::warn!(
                "TWILIO_ACCOUNT_SID/TWILIO_AUTH_TOKEN not set. Replies will be logged, not sent."
            );
            Arc::new(LogSender)
        }
    };

    let verifier = config.twilio_auth_token.as_deref().map(SignatureVerifier::new);
    if verifier.is_none() {
        tracing::warn!("TWILIO_AUTH_TOKEN not set. Webhook signatures will not be verified.");
    }

    // Session cleanup (the only background task)
    let _sweeper = sweeper::spawn_sweeper(
        Arc::clone(&store),
        config.sweep_interval,
        config.session_max_age,
    );
    tracing::info!(
        interval_secs = config.sweep_interval.as_secs(),
        max_age_secs = config.session_max_age.as_secs(),
        "Session sweeper started"
    );

    let state = AppState::new(engine, sender, verifier, config.public_url.clone());
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Adventure Concierge listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
