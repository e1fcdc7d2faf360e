//! Error taxonomy for the toolkit.
//!
//! Rejections happen before any backend call. Backend failures are passed
//! through as reported.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PaykitError>;

/// Errors surfaced by the toolkit and its tools.
#[derive(Debug, Error)]
pub enum PaykitError {
    /// Invalid or missing configuration at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Arguments did not conform to the tool's parameter schema.
    /// No backend call was made.
    #[error("invalid arguments for {tool}: {message}")]
    Validation { tool: String, message: String },

    /// No tool is registered under this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The payments backend reported a failure.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl PaykitError {
    pub(crate) fn validation(tool: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    /// True when the failure happened before any backend call.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownTool(_))
    }
}

/// Failures reported by a [`PaymentsApi`](crate::payman::PaymentsApi)
/// implementation. Passed through to the caller untouched.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("payments request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("payments API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("failed to decode payments response: {0}")]
    Decode(String),
}
