//! # shopql-gemini
//!
//! Minimal async client for the Gemini REST API.
//!
//! ## Overview
//!
//! This crate covers the two Gemini endpoints ShopQL needs:
//!
//! - [`Gemini::generate_text`] - one-shot text generation via
//!   `{model}:generateContent`
//! - [`Gemini::embed_content`] / [`Gemini::batch_embed_contents`] - text
//!   embeddings via `{model}:embedContent` and `{model}:batchEmbedContents`
//!
//! Authentication uses the `x-goog-api-key` header, set once when the
//! client is constructed. The client is cheap to clone and safe to share
//! across tasks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shopql_gemini::Gemini;
//!
//! # async fn run() -> Result<(), shopql_gemini::GeminiError> {
//! let api_key = std::env::var("GEMINI_API_KEY").unwrap();
//! let client = Gemini::new(&api_key)?;
//! let answer = client.generate_text("Say hello in SQL").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
mod response_parsing_tests;

pub use client::{Gemini, Model};
pub use error::{GeminiError, Result};
pub use types::{
    BatchEmbedContentsRequest, BatchEmbedContentsResponse, Candidate, Content, ContentEmbedding,
    EmbedContentRequest, EmbedContentResponse, GenerateContentRequest, GenerateContentResponse,
    Part,
};
