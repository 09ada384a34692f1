//! Configuration loading, environment overrides, and validation.

use super::Config;
use crate::env::{self, vars};
use crate::error::ConfigError;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Build the runtime configuration: defaults, then the optional file,
    /// then process environment overrides. The result is validated.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::load(path)?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(env::get_var);
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(vars::CHROMA_DB) {
            self.services.chroma_url = v;
        }
        if let Some(v) = lookup(vars::RAG_API_URL) {
            self.services.rag_api_url = v;
        }
        if let Some(v) = lookup(vars::OLLAMA_URL) {
            self.services.ollama_url = v;
        }
        if let Some(v) = lookup(vars::EMBEDDING_MODEL) {
            self.models.embedding = v;
        }
        if let Some(v) = lookup(vars::LLM_MODEL) {
            self.models.generation = v;
        }
        if let Some(v) = lookup(vars::COLLECTION) {
            self.retrieval.collection = v;
        }
        if let Some(v) = lookup(vars::TIMEOUT_SECS).and_then(|v| v.trim().parse().ok()) {
            self.http.timeout_secs = v;
        }
        if let Some(v) = lookup(vars::EMBED_CONCURRENCY).and_then(|v| v.trim().parse().ok()) {
            self.retrieval.embed_concurrency = v;
        }
        if let Some(v) = lookup(vars::RAG_LISTEN) {
            self.server.rag_listen = v;
        }
        if let Some(v) = lookup(vars::PROXY_LISTEN) {
            self.server.proxy_listen = v;
        }
        if let Some(v) = lookup(vars::LOG) {
            self.logging.level = v;
        }
        if let Some(v) = lookup(vars::LOG_JSON) {
            self.logging.json = env::parse_bool(&v);
        }
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("services.chroma_url", &self.services.chroma_url),
            ("services.rag_api_url", &self.services.rag_api_url),
            ("services.ollama_url", &self.services.ollama_url),
        ] {
            match url::Url::parse(value) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => errors.push(format!(
                    "{} must use http or https, got scheme '{}'",
                    name,
                    parsed.scheme()
                )),
                Err(e) => errors.push(format!("{} is not a valid URL '{}': {}", name, value, e)),
            }
        }

        for (name, value) in [
            ("server.rag_listen", &self.server.rag_listen),
            ("server.proxy_listen", &self.server.proxy_listen),
        ] {
            if value.parse::<SocketAddr>().is_err() {
                errors.push(format!("{} is not a valid socket address: '{}'", name, value));
            }
        }

        if self.models.embedding.trim().is_empty() {
            errors.push("models.embedding cannot be empty".to_string());
        }
        if self.models.generation.trim().is_empty() {
            errors.push("models.generation cannot be empty".to_string());
        }
        if self.retrieval.collection.trim().is_empty() {
            errors.push("retrieval.collection cannot be empty".to_string());
        }
        if self.retrieval.embed_concurrency == 0 {
            errors.push("retrieval.embed_concurrency must be at least 1".to_string());
        }
        if self.http.timeout_secs == 0 {
            errors.push("http.timeout_secs must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}
