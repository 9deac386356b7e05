//! Retrieval service construction and top-K query execution.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::RagConfig;
use crate::corpus;
use crate::document::{Document, RetrievalHit};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::index::FlatIndex;
use crate::persistence;

/// The retrieval service: an embedder, a built index, and the corpus.
///
/// Constructed exactly once at startup via [`RetrievalService::build`] and
/// immutable afterwards, so it can be shared across request handlers behind
/// an `Arc` without locking. Construction either loads the persisted
/// artifacts or rebuilds them from the embedded corpus; a failure there is
/// fatal and should abort startup rather than degrade into partial service.
pub struct RetrievalService {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    index: FlatIndex,
    documents: Vec<Document>,
}

impl RetrievalService {
    /// Load the persisted index and corpus, or rebuild and persist them.
    ///
    /// The persisted pair is used only when both artifacts deserialize,
    /// agree on the document count, and match the embedder's
    /// dimensionality; anything else is treated as corruption and triggers
    /// a rebuild from [`corpus::CORPUS`].
    ///
    /// # Errors
    ///
    /// Returns an error if rebuilding fails (embedding or persistence).
    pub async fn build(config: RagConfig, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let (index, documents) =
            match persistence::load(&config.index_path, &config.documents_path) {
                Ok((index, documents)) if index.dimensions() == embedder.dimensions() => {
                    info!(count = documents.len(), "loaded vector index and corpus from disk");
                    (index, documents)
                }
                Ok((index, _)) => {
                    warn!(
                        persisted = index.dimensions(),
                        expected = embedder.dimensions(),
                        "persisted index does not match the embedder dimensions, rebuilding"
                    );
                    Self::rebuild(&config, embedder.as_ref()).await?
                }
                Err(e) => {
                    warn!(error = %e, "could not load persisted artifacts, rebuilding");
                    Self::rebuild(&config, embedder.as_ref()).await?
                }
            };

        Ok(Self { config, embedder, index, documents })
    }

    async fn rebuild(
        config: &RagConfig,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<(FlatIndex, Vec<Document>)> {
        let documents = corpus::corpus_documents();
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        let index = FlatIndex::from_vectors(embedder.dimensions(), embeddings);
        persistence::save(&index, &documents, &config.index_path, &config.documents_path)?;
        info!(count = documents.len(), "built and persisted vector index");
        Ok((index, documents))
    }

    /// Retrieve the configured top-K documents nearest to `question`.
    ///
    /// Results are ordered by ascending distance (most relevant first).
    /// Callers must reject empty questions before reaching this method.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<RetrievalHit>> {
        self.retrieve_top(question, self.config.top_k).await
    }

    /// Retrieve the `k` documents nearest to `question`.
    ///
    /// If `k` exceeds the corpus size, every document is returned.
    pub async fn retrieve_top(&self, question: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let query = self.embedder.embed(question).await?;
        let hits = self
            .index
            .search(&query, k)
            .into_iter()
            .map(|(id, distance)| RetrievalHit { document: self.documents[id].clone(), distance })
            .collect();
        Ok(hits)
    }

    /// Configured number of documents retrieved per question.
    pub fn top_k(&self) -> usize {
        self.config.top_k
    }

    /// Number of documents in the corpus behind the index.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
