//! Gemini-backed SQL generator using the `shopql-gemini` crate.
//!
//! This module is only available when the `gemini` feature is enabled.

use async_trait::async_trait;
use tracing::{debug, error};

use shopql_gemini::Gemini;

use crate::error::{Result, Text2SqlError};
use crate::generator::SqlGenerator;

/// A [`SqlGenerator`] backed by the Gemini `generateContent` endpoint.
///
/// Uses the client's configured generation model (Gemini 2.5 Flash by
/// default) for one-shot prompt-to-SQL completion.
///
/// # Example
///
/// ```rust,ignore
/// use shopql_text2sql::gemini::GeminiSqlGenerator;
///
/// let generator = GeminiSqlGenerator::new("your-api-key")?;
/// let raw = generator.generate("SELECT-only SQL for: total revenue").await?;
/// ```
pub struct GeminiSqlGenerator {
    client: Gemini,
}

impl GeminiSqlGenerator {
    /// Create a new generator using the given API key and the default
    /// generation model.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        let client = Gemini::new(api_key).map_err(|e| Text2SqlError::Generation {
            provider: "Gemini".into(),
            message: format!("failed to create Gemini client: {e}"),
        })?;
        Ok(Self::from_client(client))
    }

    /// Create a new generator from an existing [`Gemini`] client.
    pub fn from_client(client: Gemini) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SqlGenerator for GeminiSqlGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = "Gemini", prompt_len = prompt.len(), "requesting SQL generation");

        self.client.generate_text(prompt).await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "generation request failed");
            Text2SqlError::Generation { provider: "Gemini".into(), message: format!("{e}") }
        })
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
