//! API request and response types

use serde::Serialize;

/// Fields of an inbound provider webhook that the bot uses
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WebhookEvent {
    pub from: Option<String>,
    pub to: Option<String>,
    pub body: Option<String>,
}

impl WebhookEvent {
    /// Pick the known fields out of the form parameters. Addresses are kept
    /// as received; the body is trimmed. Empty values count as missing.
    pub fn from_params(params: &[(String, String)]) -> Self {
        let field = |name: &str, trim: bool| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| if trim { value.trim() } else { value.as_str() })
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            from: field("From", false),
            to: field("To", false),
            body: field("Body", true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}
