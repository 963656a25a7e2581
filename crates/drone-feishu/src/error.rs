//! Error types for building and delivering notifications.

use thiserror::Error;

/// Errors surfaced by the notification pipeline.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A required plugin setting is absent or empty
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// The envelope could not be encoded as JSON
    #[error("failed to serialize card: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request never produced an HTTP response
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The webhook answered but refused the message (strict mode only)
    #[error("webhook rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl NotifyError {
    /// Process exit code for this error, following sysexits(3).
    pub fn exit_code(&self) -> i32 {
        match self {
            NotifyError::MissingConfig(_) => 78,
            NotifyError::Serialization(_) => 65,
            NotifyError::Transport(_) => 69,
            NotifyError::Rejected { .. } => 76,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
