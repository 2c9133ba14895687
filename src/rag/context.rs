//! Context assembly from retrieved documents

use crate::models::RetrievedDocument;

/// Assembler for creating generation context from retrieved documents.
///
/// Deliberately does no truncation, deduplication or length capping;
/// bounding prompt size would be an explicit extension.
#[derive(Debug, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    /// Create a new context assembler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Join document contents with a single newline, in retrieval order.
    ///
    /// An empty document set yields an empty string.
    #[must_use]
    pub fn assemble(&self, documents: &[RetrievedDocument]) -> String {
        documents
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Create a short human-readable summary of the retrieved documents.
    #[must_use]
    pub fn create_summary(&self, documents: &[RetrievedDocument]) -> String {
        if documents.is_empty() {
            return "No documents found.".to_string();
        }

        let mut summary = format!("Found {} relevant document(s):\n\n", documents.len());

        for (idx, doc) in documents.iter().enumerate().take(5) {
            let preview: String = doc.content.chars().take(100).collect();
            let kind = if doc.is_provider_info() {
                "doctor"
            } else {
                "document"
            };

            summary.push_str(&format!(
                "{}. [{}] Score: {:.2}\n   {}\n\n",
                idx + 1,
                kind,
                doc.confidence,
                preview
            ));
        }

        summary
    }
}
