//! Error types for the `shopql-text2sql` crate.

use thiserror::Error;

/// Errors that can occur while turning a question into SQL.
#[derive(Debug, Error)]
pub enum Text2SqlError {
    /// The question was empty or whitespace-only.
    #[error("No question provided.")]
    EmptyQuestion,

    /// Retrieval of context documents failed.
    #[error(transparent)]
    Retrieval(#[from] shopql_rag::RagError),

    /// The generative model call failed.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generator that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for text-to-SQL operations.
pub type Result<T> = std::result::Result<T, Text2SqlError>;
