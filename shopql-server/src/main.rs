use std::sync::Arc;

use anyhow::Context;

use shopql_datastore::{SalesStore, loader};
use shopql_rag::{
    EmbeddingProvider, GeminiEmbeddingProvider, HashingEmbedder, RagConfig, RetrievalService,
};
use shopql_server::server::{AppState, ServerConfig, run_server};
use shopql_text2sql::{GeminiSqlGenerator, Text2SqlPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let host = std::env::var("SHOPQL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("SHOPQL_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8000);

    let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;

    let db_path = std::env::var("SHOPQL_DB_PATH").unwrap_or_else(|_| "shopql.db".to_string());
    let store = Arc::new(SalesStore::open(&db_path)?);
    if let Ok(data_dir) = std::env::var("SHOPQL_DATA_DIR") {
        loader::seed_from_dir(&store, &data_dir)?;
    }

    let mut rag = RagConfig::builder();
    if let Ok(top_k) = std::env::var("SHOPQL_TOP_K") {
        rag = rag.top_k(top_k.parse().context("SHOPQL_TOP_K must be a positive integer")?);
    }
    if let Ok(path) = std::env::var("SHOPQL_INDEX_PATH") {
        rag = rag.index_path(path);
    }
    if let Ok(path) = std::env::var("SHOPQL_CONTEXT_PATH") {
        rag = rag.documents_path(path);
    }
    let rag_config = rag.build()?;

    let embedder_kind =
        std::env::var("SHOPQL_EMBEDDER").unwrap_or_else(|_| "hashing".to_string());
    let embedder: Arc<dyn EmbeddingProvider> = match embedder_kind.as_str() {
        "hashing" => Arc::new(HashingEmbedder::new()),
        "gemini" => Arc::new(GeminiEmbeddingProvider::new(&api_key)?),
        other => anyhow::bail!("unknown SHOPQL_EMBEDDER '{other}', expected 'hashing' or 'gemini'"),
    };
    let retrieval = Arc::new(RetrievalService::build(rag_config, embedder).await?);

    let generator = Arc::new(GeminiSqlGenerator::new(&api_key)?);
    let pipeline = Arc::new(Text2SqlPipeline::new(retrieval, generator));

    run_server(ServerConfig { host, port }, AppState { pipeline, store }).await
}
