//! Registry lookup handler

use npm_lookup_proxy::{DEFAULT_REGISTRY_URL, RegistryFetcher};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::LookupError;
use crate::request::{LookupRequest, PackageSpec};
use crate::result::LookupResult;

/// Forwards one lookup request to the registry and maps the outcome
pub struct RegistryLookupHandler {
    registry_url: Url,
    fetcher: Arc<dyn RegistryFetcher>,
}

impl RegistryLookupHandler {
    /// Create a handler against the public npm registry
    pub fn new(fetcher: Arc<dyn RegistryFetcher>) -> Self {
        Self {
            registry_url: Url::parse(DEFAULT_REGISTRY_URL).expect("default registry URL is valid"),
            fetcher,
        }
    }

    /// Create a handler against a custom registry base URL
    pub fn with_registry_url(
        fetcher: Arc<dyn RegistryFetcher>,
        registry_url: &str,
    ) -> Result<Self, LookupError> {
        let url = Url::parse(registry_url)
            .map_err(|e| LookupError::InvalidRegistryUrl(format!("{}: {}", registry_url, e)))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(LookupError::InvalidRegistryUrl(registry_url.to_string()));
        }

        Ok(Self {
            registry_url: url,
            fetcher,
        })
    }

    pub fn registry_url(&self) -> &Url {
        &self.registry_url
    }

    /// Build `<registry>/<name>[/<version>]`
    ///
    /// Name and version are each pushed as one percent-encoded path segment,
    /// so `@scope/pkg` becomes `@scope%2Fpkg`. `.` and `..` are dropped by
    /// `PathSegmentsMut`; `PackageSpec::check` rejects them beforehand.
    pub fn package_url(&self, spec: &PackageSpec) -> Url {
        let mut url = self.registry_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        // Checked to be a base URL on construction
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&spec.name);
            if let Some(version) = &spec.version {
                segments.push(version);
            }
        }

        url
    }

    /// Run a lookup, converting every failure into `LookupResult::Failure`
    pub async fn handle(&self, request: LookupRequest) -> LookupResult {
        self.try_handle(&request).await.into()
    }

    /// Run a lookup, keeping the typed error
    pub async fn try_handle(&self, request: &LookupRequest) -> Result<Value, LookupError> {
        let spec = request.validate()?;
        self.lookup(&spec).await
    }

    /// Fetch an already validated package
    pub async fn lookup(&self, spec: &PackageSpec) -> Result<Value, LookupError> {
        spec.check()?;
        let url = self.package_url(spec);

        debug!("Looking up package {} at {}", spec.name, url);

        let response = self.fetcher.get(&url).await.map_err(|e| {
            if e.is_timeout() {
                error!("Timed out fetching {}", url);
            } else {
                error!("Network error fetching {}: {}", url, e);
            }
            LookupError::Transport {
                name: spec.name.clone(),
                source: e,
            }
        })?;

        if response.status == 404 {
            info!("Package not found: {}", spec.name);
            return Err(LookupError::NotFound {
                name: spec.name.clone(),
            });
        }

        if !response.is_success() {
            warn!(
                "Registry returned {} {} for {}",
                response.status, response.status_text, url
            );
            return Err(LookupError::UpstreamStatus {
                name: spec.name.clone(),
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            error!("Invalid JSON from {}: {}", url, e);
            LookupError::Decode {
                name: spec.name.clone(),
                source: e,
            }
        })
    }
}
