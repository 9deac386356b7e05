//! Response parsing tests for the Gemini API.
//!
//! These validate that real-world JSON response shapes deserialize
//! correctly into our types, covering missing fields, blocked candidates,
//! and multi-part text.

use serde_json::json;

use crate::types::{
    BatchEmbedContentsResponse, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse,
};
use crate::{Content, Model};

// ── Basic text response ─────────────────────────────────────────────

#[test]
fn parse_simple_text_response() {
    let json = json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "SELECT SUM(total_sales) FROM sales_summary;"}],
                "role": "model"
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 5,
            "candidatesTokenCount": 12,
            "totalTokenCount": 17
        },
        "modelVersion": "gemini-2.5-flash"
    });

    let response: GenerateContentResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.candidates.len(), 1);
    assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("STOP"));
    assert_eq!(
        response.text().as_deref(),
        Some("SELECT SUM(total_sales) FROM sales_summary;")
    );
}

#[test]
fn parse_multi_part_response_concatenates_text() {
    let json = json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "SELECT "}, {"text": "1;"}],
                "role": "model"
            }
        }]
    });

    let response: GenerateContentResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.text().as_deref(), Some("SELECT 1;"));
}

// ── Empty / blocked responses ───────────────────────────────────────

#[test]
fn parse_empty_candidates_yields_no_text() {
    let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
    assert!(response.candidates.is_empty());
    assert!(response.text().is_none());
}

#[test]
fn parse_blocked_candidate_without_content() {
    let json = json!({
        "candidates": [{
            "finishReason": "SAFETY"
        }]
    });

    let response: GenerateContentResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("SAFETY"));
    assert!(response.text().is_none());
}

// ── Embedding responses ─────────────────────────────────────────────

#[test]
fn parse_embedding_response() {
    let json = json!({
        "embedding": { "values": [0.013168523, -0.00871193, -0.046782676] }
    });

    let response: EmbedContentResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.embedding.values.len(), 3);
}

#[test]
fn parse_batch_embedding_response_preserves_order() {
    let json = json!({
        "embeddings": [
            { "values": [1.0, 0.0] },
            { "values": [0.0, 1.0] }
        ]
    });

    let response: BatchEmbedContentsResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.embeddings.len(), 2);
    assert_eq!(response.embeddings[0].values, vec![1.0, 0.0]);
    assert_eq!(response.embeddings[1].values, vec![0.0, 1.0]);
}

// ── Request serialization ───────────────────────────────────────────

#[test]
fn generate_request_serializes_user_turn() {
    let request =
        GenerateContentRequest { contents: vec![Content::user_text("What is the total revenue?")] };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": "What is the total revenue?"}]
            }]
        })
    );
}

#[test]
fn embed_request_serializes_without_role() {
    let request = crate::types::EmbedContentRequest::new(&Model::TextEmbedding004, "hello");
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({
            "model": "models/text-embedding-004",
            "content": { "parts": [{"text": "hello"}] }
        })
    );
}
