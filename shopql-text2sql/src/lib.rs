//! # shopql-text2sql
//!
//! Text-to-SQL generation pipeline for ShopQL.
//!
//! ## Overview
//!
//! This crate turns one natural-language question into one cleaned SQL
//! statement: context documents come from `shopql-rag`, the instruction
//! template and context block are assembled in [`prompt`], a [`SqlGenerator`]
//! produces raw model output, and [`extract::extract_sql`] strips fences and
//! whitespace. The pieces are:
//!
//! - [`prompt`] - the fixed instruction template and prompt assembly
//! - [`SqlGenerator`] - async seam for the generative model
//! - [`MockSqlGenerator`] - scripted generator for tests and offline use
//! - [`Text2SqlPipeline`] - retrieve, assemble, generate, extract
//! - [`ERROR_MARKER`] - prefix of failure replies from
//!   [`Text2SqlPipeline::sql_or_error`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopql_text2sql::{GeminiSqlGenerator, Text2SqlPipeline};
//!
//! let generator = Arc::new(GeminiSqlGenerator::new(api_key)?);
//! let pipeline = Text2SqlPipeline::new(retrieval, generator);
//! let sql = pipeline.generate_sql("What is the total revenue?").await?;
//! ```

pub mod error;
pub mod extract;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod generator;
pub mod mock;
pub mod pipeline;
pub mod prompt;

pub use error::{Result, Text2SqlError};
pub use extract::extract_sql;
#[cfg(feature = "gemini")]
pub use gemini::GeminiSqlGenerator;
pub use generator::SqlGenerator;
pub use mock::MockSqlGenerator;
pub use pipeline::{ERROR_MARKER, Text2SqlPipeline, is_error_reply};
pub use prompt::{SYSTEM_PROMPT_TEMPLATE, assemble};
