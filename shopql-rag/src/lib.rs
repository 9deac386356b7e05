//! # shopql-rag
//!
//! Retrieval-augmented context pipeline for ShopQL question answering.
//!
//! ## Overview
//!
//! This crate owns the retrieval core: a fixed corpus of schema snippets,
//! worked question/SQL pairs, and metric definitions is embedded into a flat
//! L2 index once at startup; at question time the nearest snippets are
//! retrieved to ground the SQL-generating model. The pieces are:
//!
//! - [`corpus`] - the embedded knowledge snippets (ids are array positions)
//! - [`EmbeddingProvider`] - async text-to-vector seam shared by build and
//!   query time
//! - [`HashingEmbedder`] - deterministic offline encoder (default)
//! - [`FlatIndex`] - exhaustive squared-L2 nearest-neighbor search
//! - [`persistence`] - the two on-disk artifacts (index + document list)
//! - [`RetrievalService`] - constructed once, immutable, shared by handlers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopql_rag::{HashingEmbedder, RagConfig, RetrievalService};
//!
//! let config = RagConfig::builder().top_k(3).build()?;
//! let service = RetrievalService::build(config, Arc::new(HashingEmbedder::new())).await?;
//! let hits = service.retrieve("What is the total revenue?").await?;
//! ```

pub mod config;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod hashing;
pub mod index;
pub mod persistence;
pub mod service;

pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Document, RetrievalHit};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
#[cfg(feature = "gemini")]
pub use gemini::GeminiEmbeddingProvider;
pub use hashing::HashingEmbedder;
pub use index::FlatIndex;
pub use service::RetrievalService;
