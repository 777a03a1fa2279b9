//! HTTP API: provider webhook plus health and version endpoints

mod handlers;
mod signature;
mod types;

pub use handlers::create_router;
pub use signature::SignatureVerifier;

use crate::conversation::ConversationEngine;
use crate::delivery::ReplySender;
use crate::session::InMemorySessionStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConversationEngine<InMemorySessionStore>>,
    pub sender: Arc<dyn ReplySender>,
    /// `None` disables signature checks
    pub verifier: Option<Arc<SignatureVerifier>>,
    pub public_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        engine: Arc<ConversationEngine<InMemorySessionStore>>,
        sender: Arc<dyn ReplySender>,
        verifier: Option<SignatureVerifier>,
        public_url: Option<String>,
    ) -> Self {
        Self {
            engine,
            sender,
            verifier: verifier.map(Arc::new),
            public_url: public_url.map(Arc::from),
        }
    }
}
