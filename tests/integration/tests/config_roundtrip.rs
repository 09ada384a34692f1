//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! loaded back, and layered with environment overrides.

use ragproxy_core::config::{Config, DEFAULT_COLLECTION};
use ragproxy_core::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ragproxy.json");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.services.ollama_url, config.services.ollama_url);
    assert_eq!(loaded.models.embedding, config.models.embedding);
    assert_eq!(loaded.retrieval.collection, DEFAULT_COLLECTION);
    assert_eq!(loaded.http.timeout_secs, config.http.timeout_secs);
    assert_eq!(loaded.server.proxy_listen, config.server.proxy_listen);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("ragproxy.json");

    let mut config = Config::default();
    config.models.generation = "llama3:8b".to_string();
    config.retrieval.embed_concurrency = 4;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.models.generation, "llama3:8b");
    assert_eq!(loaded.retrieval.embed_concurrency, 4);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_partial_json5_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ragproxy.json5");
    std::fs::write(
        &path,
        r#"{
            // Only the vector store moves
            services: { chroma_url: 'http://chroma.internal:8000' },
        }"#,
    )
    .unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.services.chroma_url, "http://chroma.internal:8000");
    assert_eq!(loaded.services.rag_api_url, Config::default().services.rag_api_url);
    assert_eq!(loaded.models.embedding, "nomic-embed-text");
}

#[test]
fn test_env_overrides_win_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ragproxy.json5");
    std::fs::write(&path, "{ services: { ollama_url: 'http://from-file:11434' } }").unwrap();

    let env: HashMap<&str, &str> = [
        ("OLLAMA_URL", "http://from-env:11434"),
        ("RAGPROXY_TIMEOUT_SECS", "30"),
    ]
    .into_iter()
    .collect();

    let mut config = Config::load(&path).unwrap();
    config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));
    assert_eq!(config.services.ollama_url, "http://from-env:11434");
    assert_eq!(config.http.timeout_secs, 30);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/ragproxy.json"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}
