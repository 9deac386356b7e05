//! The generative-model seam of the pipeline.

use async_trait::async_trait;

use crate::error::Result;

/// A generative model that turns an assembled prompt into SQL text.
///
/// Implementations are expected to be stateless per call and safe to share
/// across tasks. The returned text is raw model output; fence stripping and
/// trimming happen in the pipeline, not here.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    /// Generate raw model output for one prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Human-readable name of the generator, used in logs and errors.
    fn name(&self) -> &str;
}
