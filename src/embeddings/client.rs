//! Embedding API client
//!
//! Speaks the Ollama embeddings API. The vector store uses this to embed a
//! query before nearest-neighbor search; documents are embedded at indexing
//! time, outside this crate.

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::AyurRagError;
use crate::errors::Result;

/// Client for generating query embeddings
pub struct EmbeddingClient {
    model: String,
    endpoint: String,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(endpoint: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| AyurRagError::Http(e.to_string()))?;

        Ok(Self {
            model,
            endpoint,
            client,
        })
    }

    /// Generate an embedding for a single text
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts)
    /// - Invalid API responses (malformed JSON, missing embedding)
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AyurRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AyurRagError::Retrieval(format!(
                "Embedding API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AyurRagError::Retrieval(format!("Failed to parse response: {e}")))?;

        Ok(result.embedding)
    }
}
