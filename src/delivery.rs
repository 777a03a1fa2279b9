//! Outbound reply delivery
//!
//! The engine produces plain text; these senders get it back to the user.

mod twilio;

pub use twilio::TwilioSender;

use async_trait::async_trait;
use thiserror::Error;

/// A reply addressed to the original sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    /// Recipient, the inbound `From`
    pub to: String,
    /// Our channel address, the inbound `To`
    pub from: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Delivery transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Channel that can deliver a reply
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the provider could not be reached or
    /// refused the message.
    async fn send(&self, reply: &OutboundReply) -> Result<(), DeliveryError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Logs replies instead of sending them, for running without credentials
pub struct LogSender;

#[async_trait]
impl ReplySender for LogSender {
    async fn send(&self, reply: &OutboundReply) -> Result<(), DeliveryError> {
        tracing::info!(
            to = %reply.to,
            from = %reply.from,
            body = %reply.body,
            "Reply not sent (no delivery credentials)"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// First `max_chars` characters of `text`, for log lines
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
