use thiserror::Error;

/// Top-level error type for the `nmctl-api` crate.
///
/// "Not found" is deliberately absent: the client reports a missing resource
/// as [`Response::NotFound`](crate::Response::NotFound), never as an error.
/// `nmctl-core` maps these into reconciliation failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed or returned no usable token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status. `message` carries the server's `Message`
    /// field when the body decoded to JSON.
    #[error(
        "API request failed: HTTP {status} for url: {url}{}",
        .message.as_deref().map(|m| format!(" - {m}")).unwrap_or_default()
    )]
    Api {
        status: u16,
        url: String,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status of a rejected request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `Message` field the server attached to the failure, if any.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
