//! RAG (Retrieval-Augmented Generation) module
//!
//! End-to-end grounded question answering over the health knowledge base:
//! - Query intent classification (keyword-based, priority-ordered)
//! - Per-intent retrieval plans against the vector store
//! - Context assembly from retrieved documents
//! - Prompt construction and LLM-based answer generation
//!
//! # Examples
//!
//! ```rust,no_run
//! use ayurrag::config::AppConfig;
//! use ayurrag::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::new(&config)?;
//!
//!     let answer = service.answer("Which doctors treat migraines?").await?;
//!     println!("Answer: {}", answer.text);
//!     println!("Sources: {} documents", answer.sources.len());
//!
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod context;
pub mod pipeline;
pub mod prompts;
pub mod retriever;

pub use classifier::classify;
pub use classifier::QueryIntent;
pub use context::ContextAssembler;
pub use pipeline::RagService;
pub use retriever::RetrievalOutcome;
pub use retriever::RetrievalStep;
pub use retriever::Retriever;
pub use retriever::RESULT_LIMIT;
