//! Gemini embedding provider using the `shopql-gemini` crate.
//!
//! This module is only available when the `gemini` feature is enabled.

use async_trait::async_trait;
use tracing::{debug, error};

use shopql_gemini::{Gemini, Model};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// An [`EmbeddingProvider`] backed by the Gemini embedding API.
///
/// Wraps a [`shopql_gemini::Gemini`] client and delegates to its
/// `embedContent` and `batchEmbedContents` endpoints with the
/// `text-embedding-004` model.
///
/// # Example
///
/// ```rust,ignore
/// use shopql_rag::gemini::GeminiEmbeddingProvider;
///
/// let provider = GeminiEmbeddingProvider::new("your-api-key")?;
/// let embedding = provider.embed("total revenue by item").await?;
/// ```
pub struct GeminiEmbeddingProvider {
    client: Gemini,
    model: Model,
    dimensions: usize,
}

impl GeminiEmbeddingProvider {
    /// Embedding dimensions for `text-embedding-004`.
    const DEFAULT_DIMENSIONS: usize = 768;

    /// Create a new provider using the given API key and the
    /// `text-embedding-004` model.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        let client = Gemini::new(api_key).map_err(|e| RagError::EmbeddingError {
            provider: "Gemini".into(),
            message: format!("failed to create Gemini client: {e}"),
        })?;
        Ok(Self::from_client(client))
    }

    /// Create a new provider from an existing [`Gemini`] client.
    pub fn from_client(client: Gemini) -> Self {
        Self {
            client,
            model: Model::TextEmbedding004,
            dimensions: Self::DEFAULT_DIMENSIONS,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Gemini", text_len = text.len(), "embedding single text");

        self.client.embed_content(&self.model, text).await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "embedding request failed");
            RagError::EmbeddingError { provider: "Gemini".into(), message: format!("{e}") }
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "Gemini", batch_size = texts.len(), "embedding batch");

        self.client.batch_embed_contents(&self.model, texts).await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "batch embedding request failed");
            RagError::EmbeddingError { provider: "Gemini".into(), message: format!("{e}") }
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
