// Error handling module
// Defines the client error taxonomy and response normalization

use thiserror::Error;

/// Errors surfaced by Globomap client operations
#[derive(Error, Debug)]
pub enum GmapError {
    /// The credential exchange against the auth endpoint failed
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A resource call came back non-2xx after a token was obtained
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No usable response was received
    #[error("transport error: {0}")]
    Transport(String),
}

impl GmapError {
    /// Wraps a reqwest failure, labeling the category the way the
    /// underlying error reports it.
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            "timeout"
        } else if error.is_connect() {
            "connection failed"
        } else if error.is_decode() {
            "decode error"
        } else {
            "request error"
        };
        GmapError::Transport(format!("{}: {}", kind, error))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, GmapError>;

/// Builds the normalized message for a non-2xx response: the HTTP reason
/// phrase, with the API's `errors` detail appended when the body carries
/// one.
pub(crate) async fn response_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let reason = match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => status.as_str().to_string(),
    };

    let errors = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("errors").cloned());

    match errors {
        Some(serde_json::Value::String(detail)) => format!("{}, {}", reason, detail),
        Some(detail) => format!("{}, {}", reason, detail),
        None => reason,
    }
}
