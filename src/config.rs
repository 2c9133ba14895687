use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Qdrant endpoint. Leave empty to run disconnected (searches return no
    /// results instead of failing).
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "myayurhealth_docs".to_string()
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            collection: default_collection(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub endpoint: String,
    pub model: String,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_endpoint: "https://api.groq.com/openai/v1".to_string(),
            llm_key: String::new(),
            llm_model: default_llm_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub vector_store: VectorStoreConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default config file path, then apply
    /// environment overrides.
    ///
    /// Tries config.toml first, then falls back to config.example.toml.
    /// `QDRANT_URL`, `QDRANT_API_KEY` and `GROQ_API_KEY` always win over
    /// file values when set.
    pub fn load() -> crate::Result<Self> {
        let mut config = if Path::new("config.toml").exists() {
            Self::from_file("config.toml")?
        } else if Path::new("config.example.toml").exists() {
            eprintln!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("QDRANT_URL") {
            self.vector_store.url = url;
        }
        if let Ok(key) = std::env::var("QDRANT_API_KEY") {
            self.vector_store.api_key = key;
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            self.llm.llm_key = key;
        }
    }

    /// Get the Qdrant endpoint
    pub fn vector_store_url(&self) -> &str {
        &self.vector_store.url
    }

    /// Get the Qdrant collection name
    pub fn collection_name(&self) -> &str {
        &self.vector_store.collection
    }

    /// Get the embedding endpoint
    pub fn embedding_endpoint(&self) -> &str {
        &self.embeddings.endpoint
    }

    /// Get the embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get the LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get the LLM model name
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }

    /// Get the log level
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [vector_store]
            url = "http://localhost:6333"
            api_key = "secret"
            collection = "docs"

            [embeddings]
            endpoint = "http://localhost:11434"
            model = "all-minilm"

            [llm]
            llm_endpoint = "https://api.groq.com/openai/v1"
            llm_key = "gsk_test"

            [logging]
            level = "debug"
            backtrace = true
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.vector_store_url(), "http://localhost:6333");
        assert_eq!(config.collection_name(), "docs");
        // llm_model falls back to its serde default
        assert_eq!(config.llm_model(), "llama-3.3-70b-versatile");
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.vector_store_url().is_empty());
        assert_eq!(config.collection_name(), "myayurhealth_docs");
        assert_eq!(config.embedding_model(), "all-minilm");
        assert_eq!(config.log_level(), "info");
    }
}
