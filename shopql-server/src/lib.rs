//! `shopql-server` wires the retrieval service, the Gemini generator, and
//! the SQLite datastore behind the ShopQL HTTP API.
//!
//! Routes:
//!
//! - `GET /` - liveness banner
//! - `GET /api/data/{table_name}` - dump one allow-listed table
//! - `POST /api/ask` - question in, `{question, sql, result}` out

pub mod server;

pub use server::{AppState, AskRequest, AskResponse, ServerConfig, app_router, run_server};
