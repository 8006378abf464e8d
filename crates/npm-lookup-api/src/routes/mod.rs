//! API routes

mod health;
mod lookup;
pub mod metrics;

use axum::{Router, extract::DefaultBodyLimit};
use std::sync::Arc;

use crate::state::{AppState, MetricsHandle};

/// Form submissions carry two short fields
const MAX_FORM_BYTES: usize = 16 * 1024;

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    let mut router = Router::new()
        .merge(health::routes())
        .merge(lookup::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES));

    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}
