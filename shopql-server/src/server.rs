use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use shopql_datastore::SalesStore;
use shopql_text2sql::{Text2SqlPipeline, is_error_reply};

/// Shared handles each request handler needs.
#[derive(Clone)]
pub struct AppState {
    /// The question-to-SQL pipeline, built once at startup.
    pub pipeline: Arc<Text2SqlPipeline>,
    /// The e-commerce datastore.
    pub store: Arc<SalesStore>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

/// Body of `POST /api/ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The natural-language question; missing or blank is rejected.
    pub question: Option<String>,
}

/// Successful reply of `POST /api/ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// The question as received.
    pub question: String,
    /// The generated SQL that was executed.
    pub sql: String,
    /// Result rows, one JSON object per row.
    pub result: Vec<Map<String, Value>>,
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/data/{table_name}", get(get_table_data))
        .route("/api/ask", post(ask))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for shopql server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("shopql listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> &'static str {
    "✅ ShopQL agent is running!"
}

async fn get_table_data(
    Path(table_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, (StatusCode, Json<Value>)> {
    if !SalesStore::is_valid_table(&table_name) {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": "Invalid table name."}))));
    }

    match state.store.fetch_table(&table_name) {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!(table = %table_name, error = %e, "failed to fetch table");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))))
        }
    }
}

async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<Value>)> {
    let question = request.question.unwrap_or_default();
    if question.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": "No question provided."}))));
    }

    let sql = state.pipeline.sql_or_error(&question).await;
    if is_error_reply(&sql) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": sql}))));
    }

    match state.store.execute_select(&sql) {
        Ok(result) => Ok(Json(AskResponse { question, sql, result })),
        Err(e) => {
            error!(error = %e, sql = %sql, "generated SQL failed to execute");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string(), "sql": sql})),
            ))
        }
    }
}
