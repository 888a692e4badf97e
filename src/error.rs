//! Error types for the turn pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a turn
#[derive(Debug, Error)]
pub enum Error {
    /// Missing credential or other configuration problem. Surfaced before
    /// any network attempt is made.
    #[error("configuration error: {0}")]
    Config(String),

    /// Empty or malformed request payload
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Remote service reachable but returned a failure status or an
    /// unparsable body
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Transport-level failure
    #[error("network failure: {0}")]
    Network(String),
}

impl Error {
    /// Fixed human-readable text shown in place of an assistant reply when a
    /// turn fails mid-flight, so the transcript stays renderable.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Error: The assistant is not configured.",
            Self::InvalidInput(_) => "Error: Nothing to send.",
            Self::Upstream(_) | Self::Network(_) => "Error: Could not get response.",
        }
    }
}
