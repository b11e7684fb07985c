//! Error types for pagelens-core

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, PageError>;

/// Failures that can occur while analyzing a page.
///
/// Only [`PageError::InvalidUrl`] and [`PageError::Fetch`] ever abort an
/// analysis. Extraction problems are recovered inside the extractors and
/// LLM failures are reported through [`crate::report::ReportOutcome`].
#[derive(Debug, Error)]
pub enum PageError {
    /// The target is not an absolute http(s) URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection failure, timeout or non-success status
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The response body could not be read as text
    #[error("failed to read page body: {0}")]
    Parse(String),

    /// Malformed structured data or missing attributes
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The external report service failed
    #[error("report service error: {0}")]
    ExternalService(String),
}

impl PageError {
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        PageError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
