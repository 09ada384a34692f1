//! Proxy → retrieval API → Ollama/Chroma, over real sockets.
//!
//! Ollama and Chroma are wiremock servers; the retrieval API and the proxy
//! are the real routers served on ephemeral ports.

use ragproxy_core::{GENERATION_FALLBACK, INDEXED_MESSAGE, NO_RELEVANT_DOCUMENTS};
use ragproxy_gateway::{proxy_routes, rag_routes, ProxyState};
use ragproxy_integration_tests::{
    collection_path, config_for, mount_collection, mount_embeddings, spawn, RunningServer,
};
use ragproxy_providers::{OllamaClient, RagApiClient};
use ragproxy_retrieval::{RagPipeline, RemoteRetriever};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Stack {
    ollama: MockServer,
    chroma: MockServer,
    proxy: RunningServer,
    _rag: RunningServer,
}

async fn stack() -> Stack {
    let ollama = MockServer::start().await;
    let chroma = MockServer::start().await;
    mount_collection(&chroma).await;

    let config = config_for(&ollama, &chroma);
    let pipeline = RagPipeline::from_config(&config).unwrap();
    let rag = spawn(rag_routes(Arc::new(pipeline))).await;

    let remote = RemoteRetriever::new(RagApiClient::new(rag.url(), Duration::from_secs(5)).unwrap());
    let engine = OllamaClient::from_config(&config).unwrap();
    let proxy = spawn(proxy_routes(ProxyState::new(Arc::new(remote), Arc::new(engine)))).await;

    Stack {
        ollama,
        chroma,
        proxy,
        _rag: rag,
    }
}

async fn mount_documents(chroma: &MockServer, documents: Value) {
    Mock::given(method("POST"))
        .and(path(collection_path("query")))
        .and(body_partial_json(json!({"n_results": 3, "include": ["documents"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ids": [["a", "b"]],
            "documents": documents
        })))
        .mount(chroma)
        .await;
}

async fn post(url: String, body: Value) -> reqwest::Response {
    reqwest::Client::new().post(url).json(&body).send().await.unwrap()
}

#[tokio::test]
async fn test_index_through_proxy_stores_aligned_batch() {
    let stack = stack().await;
    mount_embeddings(&stack.ollama).await;
    Mock::given(method("POST"))
        .and(path(collection_path("add")))
        .and(body_json(json!({
            "ids": ["1717", "1718"],
            "documents": ["Rust has no garbage collector.", "Cargo builds Rust code."],
            "metadatas": [{"origin": "user_input"}, {"origin": "user_input"}],
            "embeddings": [[0.12, -0.4, 0.9], [0.12, -0.4, 0.9]]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(true)))
        .expect(1)
        .mount(&stack.chroma)
        .await;

    let response = post(
        stack.proxy.endpoint("/api/embeddings"),
        json!({
            "ids": ["1717", "1718"],
            "documents": ["Rust has no garbage collector.", "Cargo builds Rust code."],
            "metadatas": [{"origin": "user_input"}, {"origin": "user_input"}]
        }),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": INDEXED_MESSAGE}));
}

#[tokio::test]
async fn test_chat_answers_from_retrieved_documents() {
    let stack = stack().await;
    mount_embeddings(&stack.ollama).await;
    mount_documents(
        &stack.chroma,
        json!([["Rust has no garbage collector.", "Cargo builds Rust code."]]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "gemma:2b", "stream": false})))
        .and(body_string_contains("Rust has no garbage collector.\\nCargo builds Rust code."))
        .and(body_string_contains("Assistant: Hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gemma:2b",
            "response": "No, Rust does not use a GC.",
            "done": true
        })))
        .expect(1)
        .mount(&stack.ollama)
        .await;

    let response = post(
        stack.proxy.endpoint("/api/chat"),
        json!({
            "model": "gemma:2b",
            "messages": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello"},
                {"role": "user", "content": "Does Rust have a GC?"}
            ],
            "stream": false
        }),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["model"], "gemma:2b");
    assert_eq!(body["message"]["role"], "assistant");
    assert_eq!(body["message"]["content"], "No, Rust does not use a GC.");
    assert_eq!(body["done"], true);
}

#[tokio::test]
async fn test_generate_with_empty_store_skips_generation() {
    let stack = stack().await;
    mount_embeddings(&stack.ollama).await;
    mount_documents(&stack.chroma, json!([[]])).await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&stack.ollama)
        .await;

    let response = post(
        stack.proxy.endpoint("/api/generate"),
        json!({"model": "gemma:2b", "prompt": "Anything stored?"}),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["response"], NO_RELEVANT_DOCUMENTS);
}

#[tokio::test]
async fn test_generation_outage_falls_back() {
    let stack = stack().await;
    mount_embeddings(&stack.ollama).await;
    mount_documents(&stack.chroma, json!([["Some stored fact."]])).await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model runner crashed"))
        .mount(&stack.ollama)
        .await;

    let response = post(
        stack.proxy.endpoint("/api/generate"),
        json!({"model": "gemma:2b", "prompt": "Tell me the fact."}),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["response"], GENERATION_FALLBACK);
}

#[tokio::test]
async fn test_store_rejection_reaches_proxy_caller() {
    let stack = stack().await;
    mount_embeddings(&stack.ollama).await;
    Mock::given(method("POST"))
        .and(path(collection_path("add")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": "ids and documents must have the same length"
        })))
        .mount(&stack.chroma)
        .await;

    let response = post(
        stack.proxy.endpoint("/api/embeddings"),
        json!({"ids": ["1", "2"], "documents": ["only one"], "metadatas": []}),
    )
    .await;

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "ids and documents must have the same length");
}

#[tokio::test]
async fn test_embedding_outage_stores_nothing() {
    let stack = stack().await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "model \"nomic-embed-text\" not found"
        })))
        .mount(&stack.ollama)
        .await;
    Mock::given(method("POST"))
        .and(path(collection_path("add")))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&stack.chroma)
        .await;

    let response = post(
        stack.proxy.endpoint("/api/embeddings"),
        json!({"ids": ["1"], "documents": ["text"], "metadatas": [{}]}),
    )
    .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_model_passthrough() {
    let stack = stack().await;
    let tags = r#"{"models":[{"name":"nomic-embed-text:latest"},{"name":"gemma:2b"}]}"#;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(tags, "application/json; charset=utf-8"),
        )
        .mount(&stack.ollama)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "0.1.32"})))
        .mount(&stack.ollama)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete"))
        .and(body_json(json!({"name": "gemma:2b"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&stack.ollama)
        .await;

    let client = reqwest::Client::new();

    let response = client.get(stack.proxy.endpoint("/api/tags")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    assert_eq!(response.text().await.unwrap(), tags);

    let response = client.get(stack.proxy.endpoint("/api/version")).send().await.unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["version"], "0.1.32");

    let response = post(stack.proxy.endpoint("/api/delete"), json!({"name": "gemma:2b"})).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_retrieval_api_health() {
    let ollama = MockServer::start().await;
    let chroma = MockServer::start().await;
    let pipeline = RagPipeline::from_config(&config_for(&ollama, &chroma)).unwrap();
    let rag = spawn(rag_routes(Arc::new(pipeline))).await;

    let body: Value = reqwest::get(rag.url()).await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({"message": "RAG API is running."}));
}
