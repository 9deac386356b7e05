//! Serialization of the index and document texts to durable storage.
//!
//! Two artifacts are written side by side: the serialized [`FlatIndex`] and
//! a JSON array of document strings in matching order. Loading validates
//! that the two agree on the document count before trusting either; a
//! mismatch means one artifact was edited or truncated independently and
//! the pair must be rebuilt from the embedded corpus.

use std::fs;
use std::path::Path;

use crate::document::Document;
use crate::error::{RagError, Result};
use crate::index::FlatIndex;

fn persistence_error(path: &Path, message: impl Into<String>) -> RagError {
    RagError::PersistenceError { path: path.display().to_string(), message: message.into() }
}

/// Serialize the index and the document texts to their artifact paths.
///
/// This is the only durable-state mutation in the retrieval pipeline; it
/// runs during the startup rebuild window, before any request is served.
pub fn save(
    index: &FlatIndex,
    documents: &[Document],
    index_path: &Path,
    documents_path: &Path,
) -> Result<()> {
    let index_json = serde_json::to_string(index)
        .map_err(|e| persistence_error(index_path, format!("failed to serialize index: {e}")))?;
    fs::write(index_path, index_json)
        .map_err(|e| persistence_error(index_path, format!("failed to write index: {e}")))?;

    let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
    let texts_json = serde_json::to_string(&texts).map_err(|e| {
        persistence_error(documents_path, format!("failed to serialize documents: {e}"))
    })?;
    fs::write(documents_path, texts_json).map_err(|e| {
        persistence_error(documents_path, format!("failed to write documents: {e}"))
    })?;

    Ok(())
}

/// Deserialize both artifacts and validate their mutual consistency.
///
/// # Errors
///
/// Returns [`RagError::PersistenceError`] if either file is missing or
/// corrupt, or if the document count does not match the index's vector
/// count. Callers treat any error as "rebuild from the embedded corpus".
pub fn load(index_path: &Path, documents_path: &Path) -> Result<(FlatIndex, Vec<Document>)> {
    let index_raw = fs::read_to_string(index_path)
        .map_err(|e| persistence_error(index_path, format!("failed to read index: {e}")))?;
    let index: FlatIndex = serde_json::from_str(&index_raw)
        .map_err(|e| persistence_error(index_path, format!("failed to parse index: {e}")))?;

    let texts_raw = fs::read_to_string(documents_path)
        .map_err(|e| persistence_error(documents_path, format!("failed to read documents: {e}")))?;
    let texts: Vec<String> = serde_json::from_str(&texts_raw)
        .map_err(|e| persistence_error(documents_path, format!("failed to parse documents: {e}")))?;

    if texts.len() != index.len() {
        return Err(persistence_error(
            documents_path,
            format!(
                "document count {} does not match index vector count {}",
                texts.len(),
                index.len()
            ),
        ));
    }

    let documents =
        texts.into_iter().enumerate().map(|(id, text)| Document { id, text }).collect();
    Ok((index, documents))
}
