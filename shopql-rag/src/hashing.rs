//! Deterministic local embedding provider based on token hashing.

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;

/// A deterministic bag-of-tokens embedding provider.
///
/// Text is lowercased and split on non-alphanumeric characters (underscores
/// are kept so SQL identifiers like `total_sales` survive as single tokens).
/// Each token is hashed into one of `dimensions` buckets and counted, then
/// the vector is L2-normalized. Encoding the same text always produces the
/// same vector, and questions sharing vocabulary with a corpus snippet land
/// close to it under L2 distance.
///
/// This is the default encoder: it runs fully offline and needs no model
/// downloads. Swap in [`GeminiEmbeddingProvider`](crate::gemini::GeminiEmbeddingProvider)
/// (behind the `gemini` feature) for semantic embeddings.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    /// Default number of buckets in the output vector.
    pub const DEFAULT_DIMENSIONS: usize = 384;

    /// Create an embedder with [`DEFAULT_DIMENSIONS`](Self::DEFAULT_DIMENSIONS) buckets.
    pub fn new() -> Self {
        Self { dimensions: Self::DEFAULT_DIMENSIONS }
    }

    /// Create an embedder with a custom bucket count.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(&self, token: &str) -> usize {
        let hash = token
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        (hash % self.dimensions as u64) as usize
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|t| !t.is_empty())
        {
            vector[self.bucket(token)] += 1.0;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.encode(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedding_is_deterministic() {
        let embedder = HashingEmbedder::new();
        let a = embedder.embed("What is the total revenue?").await.unwrap();
        let b = embedder.embed("What is the total revenue?").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn embedding_has_configured_dimensions() {
        let embedder = HashingEmbedder::with_dimensions(64);
        let vector = embedder.embed("monthly ad spend").await.unwrap();
        assert_eq!(vector.len(), 64);
        assert_eq!(embedder.dimensions(), 64);
    }

    #[tokio::test]
    async fn embedding_is_normalized() {
        let embedder = HashingEmbedder::new();
        let vector = embedder.embed("clicks impressions ad_spend").await.unwrap();
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn blank_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::new();
        let vector = embedder.embed("   ").await.unwrap();
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn identifiers_keep_underscores() {
        let embedder = HashingEmbedder::new();
        let with_identifier = embedder.embed("total_sales").await.unwrap();
        let split_words = embedder.embed("total sales").await.unwrap();
        assert_ne!(with_identifier, split_words);
    }
}
