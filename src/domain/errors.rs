//! Domain Errors
//!
//! Failures a single batch call to the lookup service can produce.

/// Error returned by a [`LookupService`](crate::domain::ports::LookupService) call.
///
/// The orchestrator treats every variant the same way: the batch that hit
/// it contributes no results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The request batch could not be serialized.
    #[error("failed to encode lookup request: {0}")]
    Encode(String),
    /// The network call failed (connection, timeout, ...).
    #[error("lookup transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success HTTP status.
    #[error("lookup service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body could not be parsed into lookup results.
    #[error("failed to decode lookup response: {0}")]
    Decode(String),
}

impl LookupError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Encode(_) => "encode",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
