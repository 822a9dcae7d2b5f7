use thiserror::Error;

/// Errors surfaced by the documentation tools.
///
/// Validation failures display their caller-facing message verbatim; anything
/// that goes wrong past validation is wrapped into [`DocsError::Fetch`] at the
/// pipeline boundary so a tool call fails with a single readable message.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Failed to convert documentation: {0}")]
    Convert(String),

    #[error("Failed to fetch documentation: {0}")]
    Fetch(String),
}
