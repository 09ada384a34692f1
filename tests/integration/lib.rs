//! Shared fixtures for the integration tests.

use axum::Router;
use ragproxy_core::Config;
use ragproxy_gateway::{Gateway, GatewayConfig};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collection id handed out by the mocked vector store.
pub const COLLECTION_ID: &str = "3f1c9a52-integration";

/// A server running on an ephemeral port; stopped on drop.
pub struct RunningServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl RunningServer {
    /// `http://<addr>`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// `http://<addr><path>`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url(), path)
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Serve `routes` on 127.0.0.1 with an OS-assigned port.
pub async fn spawn(routes: Router) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let gateway = Gateway::new(GatewayConfig::new(&addr.to_string(), true).unwrap(), routes);

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(gateway.serve(listener, async move {
        let _ = rx.await;
    }));

    RunningServer {
        addr,
        shutdown: Some(tx),
    }
}

/// Configuration pointing at mocked Ollama and Chroma servers.
pub fn config_for(ollama: &MockServer, chroma: &MockServer) -> Config {
    let mut config = Config::default();
    config.services.ollama_url = ollama.uri();
    config.services.chroma_url = chroma.uri();
    config.http.timeout_secs = 5;
    config
}

/// Answer every embedding request with the same vector.
pub async fn mount_embeddings(ollama: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": [0.12, -0.4, 0.9]
        })))
        .mount(ollama)
        .await;
}

/// Resolve the collection to [`COLLECTION_ID`].
pub async fn mount_collection(chroma: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": COLLECTION_ID,
            "name": "rag-collection"
        })))
        .mount(chroma)
        .await;
}

/// Path of a collection sub-resource.
pub fn collection_path(action: &str) -> String {
    format!("/api/v1/collections/{}/{}", COLLECTION_ID, action)
}
