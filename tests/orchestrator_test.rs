//! End-to-end pipeline tests over mock collaborators

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use ayurrag::errors::AyurRagError;
use ayurrag::llm::GenerationModel;
use ayurrag::models::RetrievedDocument;
use ayurrag::rag::prompts;
use ayurrag::rag::QueryIntent;
use ayurrag::rag::RagService;
use ayurrag::vector_store::VectorStore;
use ayurrag::Result;

fn doc(content: &str, doc_type: &str) -> RetrievedDocument {
    let mut metadata = HashMap::new();
    metadata.insert("type".to_string(), serde_json::json!(doc_type));
    RetrievedDocument::new(content.to_string(), 0.9, metadata)
}

/// Vector store fake: pops one canned response per search call and records
/// every (query, limit) pair.
struct MockVectorStore {
    responses: Mutex<VecDeque<Vec<RetrievedDocument>>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl MockVectorStore {
    fn new(responses: Vec<Vec<RetrievedDocument>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorStore for MockVectorStore {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RetrievedDocument>> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Store fake that always fails, as a broken index would.
struct FailingVectorStore;

#[async_trait]
impl VectorStore for FailingVectorStore {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<RetrievedDocument>> {
        Err(AyurRagError::Retrieval("index offline".to_string()))
    }
}

/// Generation fake: records prompts, returns a fixed reply.
struct MockModel {
    prompts: Mutex<Vec<String>>,
    reply: String,
}

impl MockModel {
    fn new(reply: &str) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            reply: reply.to_string(),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Generation fake that fails on every call.
struct FailingModel;

#[async_trait]
impl GenerationModel for FailingModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AyurRagError::Generation("model unavailable".to_string()))
    }
}

/// Generation fake that never resolves, for cancellation tests.
struct PendingModel {
    started: Mutex<bool>,
}

#[async_trait]
impl GenerationModel for PendingModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        *self.started.lock().unwrap() = true;
        futures::future::pending::<()>().await;
        unreachable!("pending future resolved")
    }
}

fn service(
    store: Arc<MockVectorStore>,
    model: Arc<MockModel>,
) -> RagService {
    RagService::from_services(store, model)
}

#[tokio::test]
async fn test_doctor_query_without_providers_short_circuits() -> Result<()> {
    // The store only has condition documents, none tagged as a doctor
    let store = Arc::new(MockVectorStore::new(vec![vec![
        doc("Migraine overview", "condition"),
        doc("Shirodhara therapy notes", "treatment"),
    ]]));
    let model = Arc::new(MockModel::new("should never be used"));
    let service = service(store.clone(), model.clone());

    let answer = service.answer("Which doctors treat migraines?").await?;

    assert_eq!(answer.text, prompts::no_doctors_message());
    assert!(answer.sources.is_empty());
    // One raw-query pass at the fixed limit, and no generation call at all
    assert_eq!(store.calls(), vec![("Which doctors treat migraines?".to_string(), 5)]);
    assert!(model.prompts().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_doctor_query_filters_to_provider_documents() -> Result<()> {
    let store = Arc::new(MockVectorStore::new(vec![vec![
        doc("Migraine overview", "condition"),
        doc("Dr. Sharma, Panchakarma specialist", "doctor"),
        doc("Dr. Rao, Kayachikitsa", "doctor_profile"),
    ]]));
    let model = Arc::new(MockModel::new("Here are the doctors."));
    let service = service(store.clone(), model.clone());

    let answer = service.answer("find me a vaidya").await?;

    assert_eq!(answer.sources.len(), 2);
    assert!(answer.sources.iter().all(RetrievedDocument::is_provider_info));
    // Store order is preserved through the filter
    assert_eq!(answer.sources[0].content, "Dr. Sharma, Panchakarma specialist");
    assert_eq!(answer.sources[1].content, "Dr. Rao, Kayachikitsa");

    // The prompt embeds only provider content
    let generation_prompts = model.prompts();
    assert_eq!(generation_prompts.len(), 1);
    assert!(generation_prompts[0].contains("Dr. Sharma, Panchakarma specialist\nDr. Rao, Kayachikitsa"));
    assert!(!generation_prompts[0].contains("Migraine overview"));

    Ok(())
}

#[tokio::test]
async fn test_health_query_makes_two_passes_in_order() -> Result<()> {
    let store = Arc::new(MockVectorStore::new(vec![
        // Condition pass: unfiltered, provider hits are kept too
        vec![
            doc("Insomnia and vata imbalance", "condition"),
            doc("Dr. Iyer, sleep disorders", "doctor"),
        ],
        // Doctor pass: filtered to providers
        vec![
            doc("Dr. Nair, nidra therapy", "doctor"),
            doc("Ashwagandha monograph", "herb"),
        ],
    ]));
    let model = Arc::new(MockModel::new("Try abhyanga before bed."));
    let service = service(store.clone(), model.clone());

    let query = "How can I cure my insomnia?";
    let answer = service.answer(query).await?;

    // Both passes issued sequentially, doctor pass with the synthetic query
    assert_eq!(
        store.calls(),
        vec![
            (query.to_string(), 5),
            (format!("doctor treating {query}"), 5),
        ]
    );

    // Condition segment first (unfiltered), doctor segment second (providers
    // only), never interleaved
    let contents: Vec<&str> = answer.sources.iter().map(|d| d.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "Insomnia and vata imbalance",
            "Dr. Iyer, sleep disorders",
            "Dr. Nair, nidra therapy",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_health_query_keeps_cross_pass_duplicates() -> Result<()> {
    let shared = doc("Dr. Iyer, sleep disorders", "doctor");
    let store = Arc::new(MockVectorStore::new(vec![
        vec![shared.clone()],
        vec![shared.clone()],
    ]));
    let model = Arc::new(MockModel::new("ok"));
    let service = service(store, model);

    let answer = service.answer("cure for insomnia").await?;

    // No deduplication across passes
    assert_eq!(answer.sources.len(), 2);
    assert_eq!(answer.sources[0].content, answer.sources[1].content);

    Ok(())
}

#[tokio::test]
async fn test_health_query_with_no_results_still_generates() -> Result<()> {
    let store = Arc::new(MockVectorStore::new(vec![vec![], vec![]]));
    let model = Arc::new(MockModel::new("General advice from model knowledge."));
    let service = service(store.clone(), model.clone());

    let query = "How can I cure my insomnia?";
    let answer = service.answer(query).await?;

    assert_eq!(answer.text, "General advice from model knowledge.");
    assert!(answer.sources.is_empty());
    assert_eq!(store.calls().len(), 2);

    // Generation still happens, with an empty context slot and the original
    // query in the query slot
    let generation_prompts = model.prompts();
    assert_eq!(generation_prompts.len(), 1);
    assert_eq!(
        generation_prompts[0],
        prompts::build_prompt(QueryIntent::HealthCondition, "", query)
    );

    Ok(())
}

#[tokio::test]
async fn test_general_query_returns_unfiltered_sources() -> Result<()> {
    let docs = vec![
        doc("Ayurveda is a traditional system of medicine from India", "article"),
        doc("Dr. Sharma, Panchakarma specialist", "doctor"),
    ];
    let store = Arc::new(MockVectorStore::new(vec![docs.clone()]));
    let model = Arc::new(MockModel::new("Ayurveda is..."));
    let service = service(store.clone(), model.clone());

    let answer = service.answer("What is Ayurveda?").await?;

    // One unfiltered pass; sources equal exactly that result set
    assert_eq!(store.calls(), vec![("What is Ayurveda?".to_string(), 5)]);
    let contents: Vec<&str> = answer.sources.iter().map(|d| d.content.as_str()).collect();
    let expected: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
    assert_eq!(contents, expected);

    // Context is the newline-join of the sources, in order
    let generation_prompts = model.prompts();
    assert!(generation_prompts[0].contains(
        "Ayurveda is a traditional system of medicine from India\nDr. Sharma, Panchakarma specialist"
    ));
    assert!(generation_prompts[0].ends_with(&prompts::contact_footer()));

    Ok(())
}

#[tokio::test]
async fn test_general_query_with_no_results_generates_from_empty_context() -> Result<()> {
    let store = Arc::new(MockVectorStore::new(vec![vec![]]));
    let model = Arc::new(MockModel::new("From general knowledge."));
    let service = service(store, model.clone());

    let query = "tell me about doshas";
    let answer = service.answer(query).await?;

    assert!(answer.sources.is_empty());
    assert_eq!(
        model.prompts(),
        vec![prompts::build_prompt(QueryIntent::General, "", query)]
    );

    Ok(())
}

#[tokio::test]
async fn test_retrieval_failure_propagates() {
    let service = RagService::from_services(
        Arc::new(FailingVectorStore),
        Arc::new(MockModel::new("unused")),
    );

    let result = service.answer("What is Ayurveda?").await;
    assert!(matches!(result, Err(AyurRagError::Retrieval(_))));
}

#[tokio::test]
async fn test_generation_failure_propagates() {
    let store = Arc::new(MockVectorStore::new(vec![vec![doc("some context", "article")]]));
    let service = RagService::from_services(store, Arc::new(FailingModel));

    let result = service.answer("What is Ayurveda?").await;
    assert!(matches!(result, Err(AyurRagError::Generation(_))));
}

#[tokio::test]
async fn test_cancellation_during_generation_yields_no_answer() {
    let store = Arc::new(MockVectorStore::new(vec![vec![doc("context", "article")]]));
    let model = Arc::new(PendingModel {
        started: Mutex::new(false),
    });
    let service = RagService::from_services(store, model.clone());

    // Cancel while suspended on the generation call
    let result = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        service.answer("What is Ayurveda?"),
    )
    .await;

    assert!(result.is_err(), "expected the answer future to be cancelled");
    assert!(*model.started.lock().unwrap(), "generation call never started");
}
