//! Twilio request signature verification
//!
//! The signature is HMAC-SHA1 (keyed with the account auth token) over the
//! full request URL followed by every POST parameter as `key` + `value` in
//! sorted order, base64 encoded into the `X-Twilio-Signature` header.

use axum::http::{HeaderMap, Uri};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-twilio-signature";

type HmacSha1 = Hmac<Sha1>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Missing signature header")]
    Missing,
    #[error("Signature is not valid base64")]
    Malformed,
    #[error("Signature does not match")]
    Mismatch,
    #[error("Auth token cannot be used as an HMAC key")]
    InvalidKey,
}

pub struct SignatureVerifier {
    auth_token: String,
}

impl SignatureVerifier {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
        }
    }

    fn mac(&self, url: &str, params: &[(String, String)]) -> Result<HmacSha1, SignatureError> {
        let mut mac = HmacSha1::new_from_slice(self.auth_token.as_bytes())
            .map_err(|_| SignatureError::InvalidKey)?;

        let mut sorted: Vec<&(String, String)> = params.iter().collect();
        sorted.sort();

        mac.update(url.as_bytes());
        for (key, value) in sorted {
            mac.update(key.as_bytes());
            mac.update(value.as_bytes());
        }
        Ok(mac)
    }

    /// Base64 signature the provider would send for this request
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidKey`] if the token is unusable.
    #[allow(dead_code)] // Used in tests
    pub fn sign(&self, url: &str, params: &[(String, String)]) -> Result<String, SignatureError> {
        let mac = self.mac(url, params)?;
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Check `signature` against the request, in constant time.
    ///
    /// # Errors
    ///
    /// Returns a [`SignatureError`] describing why the request was rejected.
    pub fn verify(
        &self,
        url: &str,
        params: &[(String, String)],
        signature: Option<&str>,
    ) -> Result<(), SignatureError> {
        let signature = signature.ok_or(SignatureError::Missing)?;
        let expected = STANDARD
            .decode(signature.trim())
            .map_err(|_| SignatureError::Malformed)?;

        self.mac(url, params)?
            .verify_slice(&expected)
            .map_err(|_| SignatureError::Mismatch)
    }
}

/// URL the provider signed
///
/// With a configured public URL the path and query are appended to it;
/// otherwise the URL is rebuilt from `X-Forwarded-Proto` (default `https`)
/// and `Host`.
pub fn signed_url(headers: &HeaderMap, uri: &Uri, public_url: Option<&str>) -> String {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());

    if let Some(base) = public_url {
        return format!("{}{path}", base.trim_end_matches('/'));
    }

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let proto = header("x-forwarded-proto").unwrap_or("https");
    let host = header("host").unwrap_or_default();
    format!("{proto}://{host}{path}")
}
