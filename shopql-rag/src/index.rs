//! Flat nearest-neighbor index over the embedded corpus.

use serde::{Deserialize, Serialize};

/// An exhaustive nearest-neighbor index using squared L2 distance.
///
/// Vectors are inserted once at build time and the index is read-only
/// afterwards; there is no update or delete path. At corpus scale (tens of
/// documents) a flat scan beats any approximate structure, and it keeps
/// search results exact and reproducible.
///
/// Positions double as document ids: the vector pushed `n`-th answers for
/// document `n`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlatIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, vectors: Vec::new() }
    }

    /// Build an index from a full set of vectors.
    ///
    /// # Panics
    ///
    /// Panics if any vector's length differs from `dimensions`. A mismatch
    /// means two different encoders were mixed, which is a programming
    /// error rather than a recoverable condition.
    pub fn from_vectors(dimensions: usize, vectors: Vec<Vec<f32>>) -> Self {
        let mut index = Self::new(dimensions);
        for vector in vectors {
            index.push(vector);
        }
        index
    }

    /// Append one vector to the index.
    ///
    /// # Panics
    ///
    /// Panics if the vector's length differs from the index dimensionality.
    pub fn push(&mut self, vector: Vec<f32>) {
        assert_eq!(
            vector.len(),
            self.dimensions,
            "vector dimension mismatch: expected {}, got {}",
            self.dimensions,
            vector.len()
        );
        self.vectors.push(vector);
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimensionality every vector in this index must have.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the ids and distances of the `k` vectors nearest to `query`,
    /// ascending by squared L2 distance.
    ///
    /// If `k` exceeds the number of indexed vectors, all of them are
    /// returned; the result is never padded and never an error. Ties are
    /// broken by ascending id, so results are fully deterministic.
    ///
    /// # Panics
    ///
    /// Panics if `query` does not match the index dimensionality.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        assert_eq!(
            query.len(),
            self.dimensions,
            "query dimension mismatch: expected {}, got {}",
            self.dimensions,
            query.len()
        );
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(id, vector)| (id, squared_l2(query, vector)))
            .collect();
        // Stable sort keeps equal distances in ascending id order.
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
