//! Qdrant REST client for document retrieval

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingClient;
use crate::errors::AyurRagError;
use crate::errors::Result;
use crate::models::RetrievedDocument;
use crate::vector_store::VectorStore;

/// Vector store backed by a Qdrant collection.
///
/// Hits carry the document text in the `text` payload field and an arbitrary
/// JSON map in the `metadata` payload field; the similarity score becomes the
/// document's `confidence`.
pub struct QdrantVectorStore {
    inner: Option<QdrantInner>,
}

struct QdrantInner {
    client: Client,
    url: String,
    api_key: Option<String>,
    collection: String,
    embedder: EmbeddingClient,
}

impl QdrantVectorStore {
    /// Create a store from configuration.
    ///
    /// With an empty Qdrant URL the store is constructed disconnected:
    /// searches succeed with zero results instead of failing. The backend
    /// contract is asymmetric: empty on unavailable, error on query failure.
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if config.vector_store_url().is_empty() {
            warn!("No Qdrant URL configured; vector store is disconnected and will return no results");
            return Ok(Self { inner: None });
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AyurRagError::Http(e.to_string()))?;

        let embedder = EmbeddingClient::new(
            config.embedding_endpoint().to_string(),
            config.embedding_model().to_string(),
        )?;

        let api_key = if config.vector_store.api_key.is_empty() {
            None
        } else {
            Some(config.vector_store.api_key.clone())
        };

        Ok(Self {
            inner: Some(QdrantInner {
                client,
                url: config.vector_store_url().trim_end_matches('/').to_string(),
                api_key,
                collection: config.collection_name().to_string(),
                embedder,
            }),
        })
    }

    /// Whether the store has a configured backend.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.inner.is_some()
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RetrievedDocument>> {
        let Some(inner) = &self.inner else {
            return Ok(Vec::new());
        };

        let vector = inner.embedder.generate(query).await?;
        inner.search_points(vector, limit).await
    }
}

impl QdrantInner {
    async fn search_points(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<RetrievedDocument>> {
        #[derive(Serialize)]
        struct SearchRequest {
            vector: Vec<f32>,
            limit: usize,
            with_payload: bool,
        }

        #[derive(Deserialize)]
        struct SearchResponse {
            result: Vec<ScoredPoint>,
        }

        #[derive(Deserialize)]
        struct ScoredPoint {
            score: f32,
            #[serde(default)]
            payload: HashMap<String, serde_json::Value>,
        }

        let url = format!("{}/collections/{}/points/search", self.url, self.collection);
        debug!("Searching Qdrant collection: {}", url);

        let request = SearchRequest {
            vector,
            limit,
            with_payload: true,
        };

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("api-key", api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AyurRagError::Retrieval(format!("Search error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AyurRagError::Retrieval(format!(
                "Qdrant API error ({status}): {error_text}"
            )));
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| AyurRagError::Retrieval(format!("Failed to parse response: {e}")))?;

        let documents = result
            .result
            .into_iter()
            .map(|point| {
                let content = point
                    .payload
                    .get("text")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_string();

                let metadata = match point.payload.get("metadata") {
                    Some(serde_json::Value::Object(map)) => {
                        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
                    }
                    _ => HashMap::new(),
                };

                RetrievedDocument::new(content, point.score, metadata)
            })
            .collect();

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disconnected_store_returns_empty() {
        let config = AppConfig::default();
        let store = QdrantVectorStore::from_config(&config).unwrap();
        assert!(!store.is_connected());

        let documents = store.search("anything", 5).await.unwrap();
        assert!(documents.is_empty());
    }
}
