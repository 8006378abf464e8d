//! Registry fetcher trait

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::ProxyError;

/// Raw upstream response
///
/// Non-2xx statuses are carried here rather than turned into errors, so the
/// caller decides how each status is reported.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    /// Reason phrase for `status` (empty when the code has none)
    pub status_text: String,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Registry fetcher trait
///
/// Implementations perform exactly one GET against the given URL. Only
/// transport-level failures are returned as errors.
#[async_trait]
pub trait RegistryFetcher: Send + Sync {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, ProxyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> UpstreamResponse {
        UpstreamResponse {
            status,
            status_text: String::new(),
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_success_range() {
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(response(299).is_success());
        assert!(!response(304).is_success());
        assert!(!response(404).is_success());
        assert!(!response(199).is_success());
    }
}
