//! Transport error taxonomy.

use thiserror::Error;

/// Classified failures from ledger REST calls.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint answered with a client or server error status.
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The requested resource does not exist (yet). Callers downgrade this:
    /// an unindexed transaction is still pending, a missing coin store is a
    /// zero balance.
    #[error("resource not found")]
    NotFound,

    /// Transport-level failure reaching the endpoint, passed through opaque.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered 2xx but the body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound)
    }

    /// Best-effort human-readable diagnostic. Rejection bodies are often a
    /// JSON object with a `message` field; surface that when present.
    pub fn diagnostic(&self) -> String {
        if let TransportError::Rejected { body, .. } = self {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                    return message.to_string();
                }
            }
        }
        self.to_string()
    }
}
