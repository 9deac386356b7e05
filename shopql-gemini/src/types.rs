//! Request and response types for the Gemini REST API.

use serde::{Deserialize, Serialize};

use crate::client::Model;

/// One piece of content, currently always text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    /// The text of this part.
    pub text: String,
}

/// A role-tagged sequence of parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// "user" or "model"; omitted for embedding requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The parts making up this content.
    pub parts: Vec<Part>,
}

impl Content {
    /// Build a single-part user message.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self { role: Some("user".to_string()), parts: vec![Part { text: text.into() }] }
    }

    /// Build a single-part content with no role (embedding payloads).
    pub fn text(text: impl Into<String>) -> Self {
        Self { role: None, parts: vec![Part { text: text.into() }] }
    }
}

/// Request body for `{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// The conversation so far; a single user turn for one-shot prompts.
    pub contents: Vec<Content>,
}

/// Response body for `{model}:generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates, best first.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(content.parts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join(""))
    }
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The generated content, absent when generation was blocked.
    pub content: Option<Content>,
    /// Why generation stopped, e.g. "STOP".
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Request body for `{model}:embedContent`, also one entry of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedContentRequest {
    /// Fully qualified model name, e.g. "models/text-embedding-004".
    pub model: String,
    /// The text to embed.
    pub content: Content,
}

impl EmbedContentRequest {
    /// Build an embedding request for one text.
    pub fn new(model: &Model, text: &str) -> Self {
        Self { model: model.as_str().to_string(), content: Content::text(text) }
    }
}

/// Response body for `{model}:embedContent`.
#[derive(Debug, Deserialize)]
pub struct EmbedContentResponse {
    /// The embedding vector.
    pub embedding: ContentEmbedding,
}

/// An embedding vector as returned by the API.
#[derive(Debug, Deserialize)]
pub struct ContentEmbedding {
    /// Vector components.
    pub values: Vec<f32>,
}

/// Request body for `{model}:batchEmbedContents`.
#[derive(Debug, Serialize)]
pub struct BatchEmbedContentsRequest {
    /// One embedding request per input text.
    pub requests: Vec<EmbedContentRequest>,
}

/// Response body for `{model}:batchEmbedContents`.
#[derive(Debug, Deserialize)]
pub struct BatchEmbedContentsResponse {
    /// One embedding per input, in request order.
    pub embeddings: Vec<ContentEmbedding>,
}
