//! Complete RAG pipeline: Classify -> Retrieve -> Assemble -> Generate

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::llm::GenerationModel;
use crate::llm::GroqClient;
use crate::models::Answer;
use crate::rag::classifier;
use crate::rag::prompts;
use crate::rag::ContextAssembler;
use crate::rag::RetrievalOutcome;
use crate::rag::Retriever;
use crate::vector_store::QdrantVectorStore;
use crate::vector_store::VectorStore;

/// Complete RAG service: the single entry point consumed by callers.
///
/// All state is per-request; the service itself only holds shared read-only
/// client handles and is safe to share across concurrent requests.
pub struct RagService {
    retriever: Retriever,
    context_assembler: ContextAssembler,
    model: Arc<dyn GenerationModel>,
}

impl RagService {
    /// Create a new RAG service with the default Qdrant and Groq clients
    ///
    /// # Errors
    /// - Vector store client configuration errors
    /// - Generation client configuration errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        let store: Arc<dyn VectorStore> = Arc::new(QdrantVectorStore::from_config(config)?);
        let model: Arc<dyn GenerationModel> = Arc::new(GroqClient::from_config(config)?);
        Ok(Self::from_services(store, model))
    }

    /// Create from existing collaborator handles
    #[must_use]
    pub fn from_services(store: Arc<dyn VectorStore>, model: Arc<dyn GenerationModel>) -> Self {
        Self {
            retriever: Retriever::new(store),
            context_assembler: ContextAssembler::new(),
            model,
        }
    }

    /// Answer a free-text health question.
    ///
    /// Classifies the query, runs the intent's retrieval plan, and hands the
    /// assembled context to the generation model. The returned sources are
    /// exactly the documents the context was assembled from. Doctor queries
    /// with no matching providers short-circuit to a canned message without
    /// a generation call; health and general queries with no retrieved
    /// context still go to generation with an empty context slot.
    ///
    /// The only suspension points are the store and model calls; dropping
    /// the returned future while suspended cancels the in-flight call and
    /// produces no partial answer.
    ///
    /// # Errors
    /// - [`crate::AyurRagError::Retrieval`] when a store query fails
    /// - [`crate::AyurRagError::Generation`] when the model call fails
    pub async fn answer(&self, query: &str) -> Result<Answer> {
        info!("Processing query: {}", query);

        let intent = classifier::classify(query);
        debug!("Classified intent: {:?}", intent);

        match self.retriever.execute(intent, query).await? {
            RetrievalOutcome::NoProviders => {
                debug!("No provider documents matched; skipping generation");
                Ok(Answer {
                    text: prompts::no_doctors_message(),
                    sources: Vec::new(),
                })
            }
            RetrievalOutcome::NoContext => {
                debug!("No documents retrieved; generating from general knowledge");
                let prompt = prompts::build_prompt(intent, "", query);
                let text = self.model.generate(&prompt).await?;
                Ok(Answer {
                    text,
                    sources: Vec::new(),
                })
            }
            RetrievalOutcome::Found(documents) => {
                debug!("Retrieved {} documents", documents.len());
                let context = self.context_assembler.assemble(&documents);
                let prompt = prompts::build_prompt(intent, &context, query);
                let text = self.model.generate(&prompt).await?;

                info!("Query answered with {} sources", documents.len());
                Ok(Answer {
                    text,
                    sources: documents,
                })
            }
        }
    }

    /// Get context assembler reference
    #[must_use]
    pub const fn context_assembler(&self) -> &ContextAssembler {
        &self.context_assembler
    }
}
