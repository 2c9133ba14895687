//! Core data types shared across the retrieval pipeline

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// A document returned from the vector store, with its similarity score
/// and payload metadata.
///
/// The `is_provider_info` flag marks documents describing a medical
/// practitioner. It is derived from the payload once at construction and
/// never changes afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub confidence: f32,
    pub metadata: HashMap<String, serde_json::Value>,
    is_provider_info: bool,
}

impl RetrievedDocument {
    /// Build a document from a vector store hit.
    ///
    /// A document counts as provider information iff its `metadata["type"]`
    /// value, case-folded, contains the substring `"doctor"`. Missing or
    /// non-string type values never match.
    #[must_use]
    pub fn new(
        content: String,
        confidence: f32,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        let is_provider_info = metadata
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|t| t.to_lowercase().contains("doctor"));

        Self {
            content,
            confidence,
            metadata,
            is_provider_info,
        }
    }

    /// Whether this document describes a medical practitioner.
    #[must_use]
    pub const fn is_provider_info(&self) -> bool {
        self.is_provider_info
    }
}

/// End-to-end answer: the generated text plus the exact set of documents
/// that was assembled into the generation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<RetrievedDocument>,
}
