//! Shared HTTP plumbing for downstream clients.

use crate::{ProviderError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

/// Build an HTTP client. `None` disables the request timeout entirely.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ProviderError::config(format!("Failed to create HTTP client: {}", e)))
}

/// Turn a non-success response into [`ProviderError::Upstream`].
pub(crate) async fn ensure_success(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::upstream(service, status.as_u16(), body))
}

/// Join a base URL and an absolute path without doubling the slash.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
