//! Navigation errors
//!
//! Navigation itself never fails; these cover the frame message boundary.

/// Navigation error
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("Malformed frame message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error("exitIframe message without an iframe id")]
    MissingIframeId,
}
