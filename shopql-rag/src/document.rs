//! Data types for corpus documents and retrieval results.

use serde::{Deserialize, Serialize};

/// A knowledge snippet from the corpus.
///
/// Document ids are dense, zero-based positions in the corpus and stay
/// stable for the lifetime of one index build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Zero-based position of the document in the corpus.
    pub id: usize,
    /// The text content of the document.
    pub text: String,
}

/// A retrieved [`Document`] paired with its distance to the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalHit {
    /// The retrieved document.
    pub document: Document,
    /// Squared L2 distance to the query vector (smaller is more relevant).
    pub distance: f32,
}
