//! Process configuration read from the environment

use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);
const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_api_base: String,
    /// Externally visible base URL, used when checking signatures behind a
    /// proxy that rewrites `Host`
    pub public_url: Option<String>,
    pub session_max_age: Duration,
    pub sweep_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_api_base: DEFAULT_TWILIO_API_BASE.to_string(),
            public_url: None,
            session_max_age: DEFAULT_SESSION_MAX_AGE,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: parse_or(&lookup, "CONCIERGE_PORT", defaults.port),
            twilio_account_sid: text("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: text("TWILIO_AUTH_TOKEN"),
            twilio_api_base: text("TWILIO_API_BASE").unwrap_or(defaults.twilio_api_base),
            public_url: text("CONCIERGE_PUBLIC_URL"),
            session_max_age: Duration::from_secs(parse_or(
                &lookup,
                "SESSION_MAX_AGE_SECS",
                defaults.session_max_age.as_secs(),
            )),
            sweep_interval: Duration::from_secs(parse_or(
                &lookup,
                "SESSION_SWEEP_INTERVAL_SECS",
                defaults.sweep_interval.as_secs(),
            ))
            .max(Duration::from_secs(1)),
        }
    }

    /// Account SID and auth token, when both are configured
    pub fn twilio_credentials(&self) -> Option<(&str, &str)> {
        self.twilio_account_sid
            .as_deref()
            .zip(self.twilio_auth_token.as_deref())
    }
}

fn parse_or<T: FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparseable setting");
            default
        }),
    }
}
