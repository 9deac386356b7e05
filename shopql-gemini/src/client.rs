//! HTTP client for the Gemini REST API.

use std::fmt::{self, Formatter};
use std::sync::LazyLock;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{GeminiError, Result};
use crate::types::{
    BatchEmbedContentsRequest, BatchEmbedContentsResponse, Content, EmbedContentRequest,
    EmbedContentResponse, GenerateContentRequest, GenerateContentResponse,
};

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("unreachable error: failed to parse default base URL")
});

/// Gemini model identifiers.
///
/// The serialized form is the fully qualified resource name the REST API
/// expects. Unknown models can be passed through with [`Model::Custom`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Model {
    /// `models/gemini-2.5-flash`, the default generation model.
    #[default]
    #[serde(rename = "models/gemini-2.5-flash")]
    Gemini25Flash,
    /// `models/gemini-2.5-flash-lite`.
    #[serde(rename = "models/gemini-2.5-flash-lite")]
    Gemini25FlashLite,
    /// `models/gemini-2.5-pro`.
    #[serde(rename = "models/gemini-2.5-pro")]
    Gemini25Pro,
    /// `models/text-embedding-004`, the embedding model (768 dimensions).
    #[serde(rename = "models/text-embedding-004")]
    TextEmbedding004,
    /// Any other model, passed through verbatim.
    #[serde(untagged)]
    Custom(String),
}

impl Model {
    /// The fully qualified model name, e.g. "models/gemini-2.5-flash".
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Flash => "models/gemini-2.5-flash",
            Model::Gemini25FlashLite => "models/gemini-2.5-flash-lite",
            Model::Gemini25Pro => "models/gemini-2.5-pro",
            Model::TextEmbedding004 => "models/text-embedding-004",
            Model::Custom(model) => model,
        }
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Self::Custom(model)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client for the Gemini REST API.
///
/// Authentication uses the `x-goog-api-key` header set once on the
/// underlying HTTP client. The client is cheap to clone and safe to share
/// across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopql_gemini::{Gemini, Model};
///
/// let client = Gemini::new(std::env::var("GEMINI_API_KEY")?)?;
/// let sql = client.generate_text("SELECT-only SQL for: total revenue").await?;
/// let vector = client.embed_content(&Model::TextEmbedding004, "total revenue").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Gemini {
    http: reqwest::Client,
    model: Model,
    base_url: Url,
}

impl Gemini {
    /// Create a client with the default generation model.
    pub fn new<K: AsRef<str>>(api_key: K) -> Result<Self> {
        Self::with_model(api_key, Model::default())
    }

    /// Create a client with a specific default model.
    pub fn with_model<K: AsRef<str>, M: Into<Model>>(api_key: K, model: M) -> Result<Self> {
        Self::with_model_and_base_url(api_key, model, DEFAULT_BASE_URL.clone())
    }

    /// Create a client with a specific model and base URL.
    pub fn with_model_and_base_url<K: AsRef<str>, M: Into<Model>>(
        api_key: K,
        model: M,
        base_url: Url,
    ) -> Result<Self> {
        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("x-goog-api-key"),
            HeaderValue::from_str(api_key.as_ref())?,
        )]);
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, model: model.into(), base_url })
    }

    /// The model used for generation requests.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Build a `{model}:{action}` URL relative to the base URL.
    fn endpoint(&self, model: &Model, action: &str) -> Result<Url> {
        let suffix = format!("{}:{action}", model.as_str());
        self.base_url
            .join(&suffix)
            .map_err(|source| GeminiError::ConstructUrl { source, suffix })
    }

    async fn post_json<Req, Res>(&self, url: Url, body: &Req) -> Result<Res>
    where
        Req: Serialize,
        Res: serde::de::DeserializeOwned,
    {
        debug!(url = %url, "sending request to Gemini API");
        let response = self.http.post(url).json(body).send().await?;
        let response = check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Call `{model}:generateContent` with the client's generation model.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(&self.model, "generateContent")?;
        self.post_json(url, request).await
    }

    /// Generate a text completion for a single prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::EmptyResponse`] when the response carries no
    /// text, in addition to transport and status errors.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest { contents: vec![Content::user_text(prompt)] };
        let response = self.generate_content(&request).await?;
        response.text().ok_or(GeminiError::EmptyResponse)
    }

    /// Call `{model}:embedContent` for one text.
    pub async fn embed_content(&self, model: &Model, text: &str) -> Result<Vec<f32>> {
        let url = self.endpoint(model, "embedContent")?;
        let request = EmbedContentRequest::new(model, text);
        let response: EmbedContentResponse = self.post_json(url, &request).await?;
        Ok(response.embedding.values)
    }

    /// Call `{model}:batchEmbedContents` for a batch of texts.
    ///
    /// The returned vectors are in the same order as `texts`.
    pub async fn batch_embed_contents(
        &self,
        model: &Model,
        texts: &[&str],
    ) -> Result<Vec<Vec<f32>>> {
        let url = self.endpoint(model, "batchEmbedContents")?;
        let request = BatchEmbedContentsRequest {
            requests: texts.iter().map(|text| EmbedContentRequest::new(model, text)).collect(),
        };
        let response: BatchEmbedContentsResponse = self.post_json(url, &request).await?;
        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }
}

/// Check the response status code and return an error if it is not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let description = response.text().await.unwrap_or_default();
    Err(GeminiError::BadResponse { code: status.as_u16(), description })
}
