//! Text-generation abstraction and clients

pub mod groq;

pub use groq::GroqClient;

use async_trait::async_trait;

use crate::errors::Result;

/// Text-generation service producing an answer from a prompt.
#[async_trait]
pub trait GenerationModel: Send + Sync {
    /// Generate text for the given prompt.
    ///
    /// Model or service errors surface as
    /// [`crate::AyurRagError::Generation`].
    async fn generate(&self, prompt: &str) -> Result<String>;
}
