//! HTTP transport shared by every resolution.
//!
//! The resolver only sees the [`Transport`] trait. [`HttpTransport`] is the
//! production implementation: it owns a single lazily-built `reqwest` client
//! with browser-like default headers, reused across requests until
//! [`Transport::shutdown`] drops it.

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use handlecheck_core::{HeaderProfile, ResolverConfig};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::RwLock;

/// Maximum redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// A received HTTP response, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as text
    pub body: String,
}

impl FetchedPage {
    /// Build a page from a status code and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues GET requests against the remote service.
///
/// Implementations must be thread-safe (Send + Sync); one transport is shared
/// by all in-flight resolutions.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a URL, following redirects.
    ///
    /// # Errors
    /// Returns a `TransportError` when no response was received (connection
    /// failure, timeout, unreadable body). Any received status code is `Ok`.
    async fn get(&self, url: &str) -> Result<FetchedPage>;

    /// Release pooled connections. Safe to call repeatedly, and before any request.
    async fn shutdown(&self) {}
}

/// `reqwest`-backed transport with a lazily created, reusable client.
pub struct HttpTransport {
    timeout: Duration,
    headers: HeaderProfile,
    client: RwLock<Option<Client>>,
}

impl HttpTransport {
    /// Create a transport from resolver settings. No client is built until
    /// the first request.
    #[must_use]
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            timeout: config.request_timeout(),
            headers: config.headers.clone(),
            client: RwLock::new(None),
        }
    }

    /// Return the shared client, building it on first use or after a shutdown.
    ///
    /// # Errors
    /// Returns `TransportError::Client` if the header values are invalid or
    /// the TLS backend cannot be initialised.
    pub async fn acquire_client(&self) -> Result<Client> {
        if let Some(client) = self.client.read().await.as_ref() {
            return Ok(client.clone());
        }

        let mut slot = self.client.write().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = self.build_client()?;
        tracing::debug!("Created HTTP client (timeout {:?})", self.timeout);
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Whether a client is currently held.
    pub async fn has_client(&self) -> bool {
        self.client.read().await.is_some()
    }

    fn build_client(&self) -> Result<Client> {
        // Accept-Encoding is added by reqwest from the enabled gzip/brotli/deflate features.
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&self.headers.user_agent)?);
        headers.insert(ACCEPT, header_value(&self.headers.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&self.headers.accept_language)?);
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| TransportError::Client(format!("invalid header value '{value}': {e}")))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<FetchedPage> {
        let client = self.acquire_client().await?;
        let response = client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(FetchedPage { status, body })
    }

    async fn shutdown(&self) {
        if self.client.write().await.take().is_some() {
            tracing::debug!("HTTP client released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_is_lazy() {
        let transport = HttpTransport::new(&ResolverConfig::default());
        assert!(!transport.has_client().await);

        transport.acquire_client().await.expect("build client");
        assert!(transport.has_client().await);

        // Second acquisition reuses the held client
        transport.acquire_client().await.expect("reuse client");
        assert!(transport.has_client().await);
    }

    #[tokio::test]
    async fn test_shutdown_then_reacquire() {
        let transport = HttpTransport::new(&ResolverConfig::default());

        // Shutdown before any acquisition is a no-op
        transport.shutdown().await;
        assert!(!transport.has_client().await);

        transport.acquire_client().await.expect("build client");
        transport.shutdown().await;
        transport.shutdown().await;
        assert!(!transport.has_client().await);

        transport.acquire_client().await.expect("rebuild client");
        assert!(transport.has_client().await);
    }

    #[tokio::test]
    async fn test_invalid_header_rejected() {
        let mut config = ResolverConfig::default();
        config.headers.user_agent = "bad\nagent".to_string();
        let transport = HttpTransport::new(&config);

        let err = transport.acquire_client().await.unwrap_err();
        assert!(matches!(err, TransportError::Client(_)));
        assert!(!transport.has_client().await);
    }

    #[tokio::test]
    #[ignore = "Requires network access to the live service"]
    async fn test_live_profile_fetch() {
        let config = ResolverConfig::default();
        let transport = HttpTransport::new(&config);
        let page = transport
            .get(&config.endpoints.profile_url_for("tiktok"))
            .await
            .expect("fetch profile page");
        assert!(page.status > 0);
    }
}
