//! Prompt templates for answer generation
//!
//! Plain-text templating: retrieved context and the user query are embedded
//! verbatim, without escaping. Every prompt and every canned message ends
//! with the same contact footer.

use crate::rag::QueryIntent;

/// Support email shown in every user-facing message
pub const SUPPORT_EMAIL: &str = "support@myayurhealth.com";

/// Support phone shown in every user-facing message
pub const SUPPORT_PHONE: &str = "+1 (555) 123-4567";

/// The fixed contact block appended to every generated prompt.
#[must_use]
pub fn contact_footer() -> String {
    format!(
        "\n\nFor more information and assistance, contact:\nEmail: {SUPPORT_EMAIL}\nPhone: {SUPPORT_PHONE}"
    )
}

/// Build the generation prompt for a classified query.
///
/// Template selection is by intent; the query slot is only used for
/// health-condition and general prompts.
#[must_use]
pub fn build_prompt(intent: QueryIntent, context: &str, query: &str) -> String {
    let footer = contact_footer();

    match intent {
        QueryIntent::Doctor => format!(
            "Based on the following doctor information:\n{context}\n\nProvide a clear response listing available doctors with their specializations and qualifications.{footer}"
        ),
        QueryIntent::HealthCondition => format!(
            "Based on the following information about {query}:\n{context}\n\nProvide a comprehensive response including Ayurvedic treatment approaches and available specialist doctors.{footer}"
        ),
        QueryIntent::General => format!(
            "Based on the following information:\n{context}\n\nProvide accurate information about {query} from an Ayurvedic perspective.{footer}"
        ),
    }
}

/// Canned response for doctor queries that matched no provider documents.
#[must_use]
pub fn no_doctors_message() -> String {
    format!(
        "I apologize, but I couldn't find any doctors matching your query in our platform. Please try a different search or contact our support team:\nEmail: {SUPPORT_EMAIL}\nPhone: {SUPPORT_PHONE}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_prompt_ends_with_contact_footer() {
        let footer = contact_footer();
        for intent in [
            QueryIntent::Doctor,
            QueryIntent::HealthCondition,
            QueryIntent::General,
        ] {
            let prompt = build_prompt(intent, "some context", "some query");
            assert!(prompt.ends_with(&footer), "missing footer for {intent:?}");

            // Footer survives an empty context as well
            let prompt = build_prompt(intent, "", "some query");
            assert!(prompt.ends_with(&footer), "missing footer for {intent:?} with empty context");
        }
    }

    #[test]
    fn test_doctor_prompt_embeds_context_only() {
        let prompt = build_prompt(QueryIntent::Doctor, "Dr. Mehta, BAMS", "ignored");
        assert!(prompt.starts_with("Based on the following doctor information:\nDr. Mehta, BAMS\n"));
        assert!(!prompt.contains("ignored"));
    }

    #[test]
    fn test_health_prompt_embeds_query_and_context() {
        let prompt = build_prompt(QueryIntent::HealthCondition, "ctx", "insomnia");
        assert!(prompt.starts_with("Based on the following information about insomnia:\nctx\n"));
        assert!(prompt.contains("Ayurvedic treatment approaches"));
    }

    #[test]
    fn test_general_prompt_embeds_query_and_context() {
        let prompt = build_prompt(QueryIntent::General, "ctx", "What is Ayurveda?");
        assert!(prompt.starts_with("Based on the following information:\nctx\n"));
        assert!(prompt.contains("Provide accurate information about What is Ayurveda?"));
    }

    #[test]
    fn test_context_is_embedded_verbatim() {
        // No escaping: template-breaking characters pass through untouched
        let tricky = "line1\n{curly} \"quotes\"";
        let prompt = build_prompt(QueryIntent::General, tricky, "q");
        assert!(prompt.contains(tricky));
    }

    #[test]
    fn test_no_doctors_message_carries_contacts() {
        let message = no_doctors_message();
        assert!(message.contains(SUPPORT_EMAIL));
        assert!(message.contains(SUPPORT_PHONE));
    }
}
