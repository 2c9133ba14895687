//! Retrieval plan execution

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::models::RetrievedDocument;
use crate::rag::QueryIntent;
use crate::vector_store::VectorStore;

/// Fixed number of documents requested per vector store call
pub const RESULT_LIMIT: usize = 5;

/// One vector store pass within a retrieval plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalStep {
    /// Query text sent to the store
    pub query: String,
    /// Keep only provider documents from this pass
    pub providers_only: bool,
}

/// Outcome of executing a retrieval plan.
///
/// Empty results are legitimate outcomes, not errors; only transport or
/// index failures surface as `Err`.
#[derive(Debug, Clone)]
pub enum RetrievalOutcome {
    /// At least one document survived filtering, in pass order
    Found(Vec<RetrievedDocument>),
    /// A doctor query matched no provider documents
    NoProviders,
    /// A health or general query retrieved nothing
    NoContext,
}

/// Executes per-intent retrieval plans against the vector store.
///
/// Stateless between requests: no caching, no side effects beyond the store
/// calls themselves.
pub struct Retriever {
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a new retriever over a shared store handle
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// The ordered list of store passes for an intent.
    ///
    /// Pass order is load-bearing: for health queries the condition pass
    /// precedes the doctor pass, so concatenated results keep condition
    /// documents first. The doctor pass rewrites the query to
    /// `"doctor treating {query}"`.
    #[must_use]
    pub fn plan_for(intent: QueryIntent, query: &str) -> Vec<RetrievalStep> {
        match intent {
            QueryIntent::Doctor => vec![RetrievalStep {
                query: query.to_string(),
                providers_only: true,
            }],
            QueryIntent::HealthCondition => vec![
                RetrievalStep {
                    query: query.to_string(),
                    providers_only: false,
                },
                RetrievalStep {
                    query: format!("doctor treating {query}"),
                    providers_only: true,
                },
            ],
            QueryIntent::General => vec![RetrievalStep {
                query: query.to_string(),
                providers_only: false,
            }],
        }
    }

    /// Execute the retrieval plan for a classified query.
    ///
    /// Steps run sequentially against the store. Each pass is filtered on
    /// its own and appended to the previous passes, never interleaved and
    /// never deduplicated. An empty total maps to the intent's empty-result
    /// outcome.
    pub async fn execute(&self, intent: QueryIntent, query: &str) -> Result<RetrievalOutcome> {
        let mut documents = Vec::new();

        for step in Self::plan_for(intent, query) {
            debug!(
                "Retrieval pass: \"{}\" (providers_only: {})",
                step.query, step.providers_only
            );
            let hits = self.store.search(&step.query, RESULT_LIMIT).await?;

            if step.providers_only {
                documents.extend(hits.into_iter().filter(RetrievedDocument::is_provider_info));
            } else {
                documents.extend(hits);
            }
        }

        if documents.is_empty() {
            let outcome = match intent {
                QueryIntent::Doctor => RetrievalOutcome::NoProviders,
                QueryIntent::HealthCondition | QueryIntent::General => RetrievalOutcome::NoContext,
            };
            return Ok(outcome);
        }

        Ok(RetrievalOutcome::Found(documents))
    }
}
