//! Application state

use metrics_exporter_prometheus::PrometheusHandle;
use npm_lookup_core::{RegistryLookupHandler, ResponseShape};
use std::sync::Arc;

/// Handle used to render the Prometheus exposition
pub type MetricsHandle = PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<RegistryLookupHandler>,
    pub response_shape: ResponseShape,
}

impl AppState {
    pub fn new(lookup: Arc<RegistryLookupHandler>, response_shape: ResponseShape) -> Self {
        Self {
            lookup,
            response_shape,
        }
    }
}
