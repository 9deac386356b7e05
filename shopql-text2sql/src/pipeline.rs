//! The question-to-SQL pipeline: retrieve, assemble, generate, extract.

use std::sync::Arc;

use tracing::{debug, error, info};

use shopql_rag::RetrievalService;

use crate::error::{Result, Text2SqlError};
use crate::extract;
use crate::generator::SqlGenerator;
use crate::prompt;

/// Prefix marking a failed generation in [`Text2SqlPipeline::sql_or_error`]
/// replies. Callers branch on this instead of parsing free text.
pub const ERROR_MARKER: &str = "❌ Error";

/// Whether a reply from [`Text2SqlPipeline::sql_or_error`] is a failure.
pub fn is_error_reply(reply: &str) -> bool {
    reply.starts_with(ERROR_MARKER)
}

/// A stateless-per-request pipeline from natural language to SQL.
///
/// Holds the process-wide [`RetrievalService`] and a [`SqlGenerator`]; both
/// are immutable after construction, so the pipeline can be shared across
/// request handlers behind an `Arc`.
pub struct Text2SqlPipeline {
    retrieval: Arc<RetrievalService>,
    generator: Arc<dyn SqlGenerator>,
}

impl Text2SqlPipeline {
    /// Create a pipeline over an already-built retrieval service.
    pub fn new(retrieval: Arc<RetrievalService>, generator: Arc<dyn SqlGenerator>) -> Self {
        Self { retrieval, generator }
    }

    /// Turn a question into a single cleaned SQL statement.
    ///
    /// Blank questions are rejected up front, before any embedding or index
    /// access. Retrieved context is inserted into the instruction template
    /// in ascending-distance order and the raw model output is stripped of
    /// code fences.
    ///
    /// # Errors
    ///
    /// Returns [`Text2SqlError::EmptyQuestion`] for blank input, and
    /// propagates retrieval and generation failures.
    pub async fn generate_sql(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(Text2SqlError::EmptyQuestion);
        }

        let hits = self.retrieval.retrieve(question).await?;
        let prompt = prompt::assemble(&hits, question);
        debug!(
            hits = hits.len(),
            prompt_len = prompt.len(),
            generator = self.generator.name(),
            "assembled prompt"
        );

        let raw = self.generator.generate(&prompt).await?;
        let sql = extract::extract_sql(&raw);
        info!(generator = self.generator.name(), sql = %sql, "generated SQL");
        Ok(sql)
    }

    /// Like [`generate_sql`](Self::generate_sql), but never fails: any error
    /// becomes a human-readable reply starting with [`ERROR_MARKER`].
    pub async fn sql_or_error(&self, question: &str) -> String {
        match self.generate_sql(question).await {
            Ok(sql) => sql,
            Err(e) => {
                error!(error = %e, "SQL generation failed");
                format!("{ERROR_MARKER} generating SQL: {e}")
            }
        }
    }

    /// The retrieval service behind this pipeline.
    pub fn retrieval(&self) -> &RetrievalService {
        &self.retrieval
    }
}
