//! npm registry client

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::ProxyError;
use crate::fetcher::{RegistryFetcher, UpstreamResponse};

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org/";

/// npm client configuration
#[derive(Clone, Debug)]
pub struct NpmClientConfig {
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for NpmClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("npm-lookup/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// npm registry HTTP client
pub struct NpmRegistryClient {
    client: Client,
}

impl NpmRegistryClient {
    /// Create a new npm registry client
    pub fn new(config: NpmClientConfig) -> Result<Self, ProxyError> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ProxyError::InvalidHeader(config.user_agent.clone()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        info!(
            "Created npm registry client (timeout: {:?})",
            config.timeout
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl RegistryFetcher for NpmRegistryClient {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, ProxyError> {
        debug!("Fetching package data: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!("Registry responded {} ({} bytes)", status, body.len());

        Ok(UpstreamResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP/1.1 response and hand back the request head
    async fn serve_once(response: &'static str) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        let url = Url::parse(&format!("http://{}/left-pad/1.3.0", addr)).unwrap();
        (url, handle)
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 17\r\nConnection: close\r\n\r\n{\"name\":\"lodash\"}",
        )
        .await;

        let client = NpmRegistryClient::new(NpmClientConfig::default()).unwrap();
        let response = client.get(&url).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
        assert_eq!(&response.body[..], br#"{"name":"lodash"}"#);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /left-pad/1.3.0 http/1.1"));
        assert!(request.contains("accept: application/json"));
        assert!(request.contains("user-agent: npm-lookup/"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let (url, _server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let client = NpmRegistryClient::new(NpmClientConfig::default()).unwrap();
        let response = client.get(&url).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(response.status_text, "Service Unavailable");
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        // Bind then drop to get a port nothing is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = NpmRegistryClient::new(NpmClientConfig::default()).unwrap();
        let url = Url::parse(&format!("http://{}/lodash", addr)).unwrap();
        let result = client.get(&url).await;

        assert!(matches!(result, Err(ProxyError::Http(_))));
    }

    #[test]
    fn test_invalid_user_agent() {
        let result = NpmRegistryClient::new(NpmClientConfig {
            user_agent: "bad\nagent".to_string(),
            timeout: None,
        });

        assert!(matches!(result, Err(ProxyError::InvalidHeader(_))));
    }
}
