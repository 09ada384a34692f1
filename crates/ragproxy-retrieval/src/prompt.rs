//! Prompt templates.

/// Build the generation prompt from retrieved documents and the query.
pub fn rag_prompt(documents: &[String], query: &str) -> String {
    format!(
        "Use the following documents to answer the question:\n{}\n\nQuestion: {}\nAnswer:",
        documents.join("\n"),
        query
    )
}
