//! Configuration for the retrieval service.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for the retrieval service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Number of nearest documents to retrieve per question.
    pub top_k: usize,
    /// Path of the serialized vector index artifact.
    pub index_path: PathBuf,
    /// Path of the JSON array of document strings.
    pub documents_path: PathBuf,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            index_path: PathBuf::from("vector_index.json"),
            documents_path: PathBuf::from("context_data.json"),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the number of nearest documents to retrieve per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the path of the serialized vector index artifact.
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_path = path.into();
        self
    }

    /// Set the path of the JSON array of document strings.
    pub fn documents_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.documents_path = path.into();
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `top_k == 0`.
    pub fn build(self) -> Result<RagConfig> {
        if self.config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
