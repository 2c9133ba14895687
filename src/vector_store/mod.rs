//! Vector store abstraction and clients
//!
//! The [`VectorStore`] trait is the retrieval seam of the crate: the
//! orchestrator only ever talks to `dyn VectorStore`, so production code can
//! inject the Qdrant client while tests inject recording fakes.

pub mod qdrant;

pub use qdrant::QdrantVectorStore;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::RetrievedDocument;

/// Similarity-search service returning ranked documents for a query.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Search for the `limit` most similar documents, in ranking order.
    ///
    /// Implementations return an empty sequence (not an error) when the
    /// underlying backend is unavailable or uninitialized; transport and
    /// index errors during an actual query surface as
    /// [`crate::AyurRagError::Retrieval`].
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RetrievedDocument>>;
}
