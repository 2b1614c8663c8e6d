//! Error types for rs-readability.
//!
//! Every stage fails fast with one of these variants; there is no retry or
//! partial output inside the extractor.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The loader could not obtain a usable HTTP response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered with a non-success status code.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The response body could not be decoded to text.
    #[error("Response body could not be decoded")]
    DecodingFailed,

    /// The input HTML was empty or whitespace only.
    #[error("HTML input is empty")]
    EmptyHtml,

    /// No body element survived parsing and document cleaning.
    #[error("HTML parsing failed: no body element")]
    ParseFailed,

    /// No candidate scored positively, or the cleaned text was too short.
    #[error("No readable content found")]
    NoReadableContent,

    /// A domain rule file could not be parsed.
    #[error("Invalid domain rules: {0}")]
    InvalidRules(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
