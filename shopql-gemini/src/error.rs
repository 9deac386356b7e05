//! Error types for the `shopql-gemini` crate.

use thiserror::Error;

/// Errors that can occur when talking to the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The API key could not be encoded as a request header.
    #[error("failed to parse API key")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// The endpoint URL could not be constructed (probably a bad model name).
    #[error("failed to construct URL for '{suffix}'")]
    ConstructUrl {
        /// The underlying URL parse failure.
        #[source]
        source: url::ParseError,
        /// The model/action suffix that failed to join.
        suffix: String,
    },

    /// The HTTP request could not be performed or decoded.
    #[error("request to Gemini API failed")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("bad response from server; code {code}; description: {description}")]
    BadResponse {
        /// HTTP status code.
        code: u16,
        /// Response body, if any.
        description: String,
    },

    /// The response carried no candidates or no text parts.
    #[error("response contained no text")]
    EmptyResponse,
}

/// A convenience result type for Gemini operations.
pub type Result<T> = std::result::Result<T, GeminiError>;
