//! Document, index, and query payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form metadata attached to a stored document.
pub type Metadata = Map<String, Value>;

/// Answer returned when the vector store has nothing relevant.
pub const NO_RELEVANT_DOCUMENTS: &str = "No relevant documents found.";

/// Answer returned when the generation call fails.
pub const GENERATION_FALLBACK: &str = "Sorry, I could not generate an answer right now.";

/// Acknowledgement message for a stored batch.
pub const INDEXED_MESSAGE: &str = "Documents indexed successfully.";

/// Neighbours requested when a query omits `n_results`.
pub const DEFAULT_RESULT_COUNT: i64 = 3;

/// A single stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique identifier within a collection.
    pub id: String,

    /// Document text.
    pub text: String,

    /// Metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl DocumentRecord {
    /// Create a record without metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A batch of documents as parallel arrays; index `i` of every array
/// describes one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBatch {
    /// Document identifiers.
    pub ids: Vec<String>,

    /// Document texts.
    pub documents: Vec<String>,

    /// Per-document metadata, `None` when the caller sent none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadatas: Option<Vec<Metadata>>,
}

impl DocumentBatch {
    /// Number of documents in the batch.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch carries no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<DocumentRecord> for DocumentBatch {
    fn from_iter<I: IntoIterator<Item = DocumentRecord>>(iter: I) -> Self {
        let mut batch = DocumentBatch::default();
        for record in iter {
            batch.ids.push(record.id);
            batch.documents.push(record.text);
            batch
                .metadatas
                .get_or_insert_with(Vec::new)
                .push(record.metadata);
        }
        batch
    }
}

/// Acknowledgement of a successful index operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAck {
    pub message: String,
}

impl Default for IndexAck {
    fn default() -> Self {
        Self {
            message: INDEXED_MESSAGE.to_string(),
        }
    }
}

/// A retrieval query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Query text.
    pub query: String,

    /// Neighbours to request. Not validated; passed to the vector store as-is.
    #[serde(default = "default_result_count")]
    pub n_results: i64,
}

fn default_result_count() -> i64 {
    DEFAULT_RESULT_COUNT
}

impl QueryRequest {
    /// Create a query with the default result count.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            n_results: DEFAULT_RESULT_COUNT,
        }
    }

    /// Set the result count.
    pub fn with_results(mut self, n_results: i64) -> Self {
        self.n_results = n_results;
        self
    }
}

/// Result of a retrieval query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated (or fixed) answer.
    pub answer: String,

    /// Retrieved document texts, nearest first.
    #[serde(default)]
    pub documents: Vec<String>,
}

impl QueryResponse {
    /// The fixed response for a query with no matches.
    pub fn no_matches() -> Self {
        Self {
            answer: NO_RELEVANT_DOCUMENTS.to_string(),
            documents: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_request_defaults_result_count() {
        let request: QueryRequest = serde_json::from_value(json!({"query": "rust?"})).unwrap();
        assert_eq!(request.n_results, 3);

        let request: QueryRequest =
            serde_json::from_value(json!({"query": "rust?", "n_results": -1})).unwrap();
        assert_eq!(request.n_results, -1);
    }

    #[test]
    fn test_batch_from_records_keeps_alignment() {
        let batch: DocumentBatch = vec![
            DocumentRecord::new("a", "first").with_metadata("origin", json!("user_input")),
            DocumentRecord::new("b", "second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(batch.ids, vec!["a", "b"]);
        assert_eq!(batch.documents, vec!["first", "second"]);
        let metadatas = batch.metadatas.as_deref().unwrap();
        assert_eq!(metadatas.len(), 2);
        assert_eq!(metadatas[0]["origin"], json!("user_input"));
        assert!(metadatas[1].is_empty());
    }

    #[test]
    fn test_batch_accepts_missing_metadatas() {
        let batch: DocumentBatch =
            serde_json::from_value(json!({"ids": ["1"], "documents": ["text"]})).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(batch.metadatas.is_none());

        let batch: DocumentBatch =
            serde_json::from_value(json!({"ids": ["1"], "documents": ["text"], "metadatas": []}))
                .unwrap();
        assert_eq!(batch.metadatas, Some(Vec::new()));
    }

    #[test]
    fn test_query_response_tolerates_missing_documents() {
        let response: QueryResponse =
            serde_json::from_value(json!({"answer": NO_RELEVANT_DOCUMENTS})).unwrap();
        assert!(response.documents.is_empty());
        assert_eq!(response, QueryResponse::no_matches());
    }
}
