//! Feed API-specific error types.

/// Errors that can occur while talking to the feed service.
///
/// Variants only carry owned strings so results can be stored in
/// [`FeedState`](crate::state::FeedState) and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// Transport or connection failure
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a status outside the accepted set
    #[error(
        "Request failed with status {status}: {}",
        .message.as_deref().unwrap_or("no message from server")
    )]
    HttpStatus { status: u16, message: Option<String> },

    /// Response body could not be parsed
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl FeedError {
    /// Server-supplied message, if the failure carried one.
    ///
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FeedError::HttpStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FeedError::Decode(e.to_string())
        } else {
            FeedError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Decode(e.to_string())
    }
}
