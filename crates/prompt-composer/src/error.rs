//! Composer error surface.

use thiserror::Error;

/// Errors crossing the JSON-in/JSON-out boundary.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("invalid request JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("request has an empty user_prompt")]
    MissingPrompt,
}
