//! Package lookup form endpoint

use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Response},
    routing::post,
};
use npm_lookup_core::{LookupRequest, LookupResult};
use std::time::Instant;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// POST / and POST /lookup - form fields `package-name`, `package-version`
async fn lookup_package(
    State(state): State<AppState>,
    form: Result<Form<LookupRequest>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(request) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    debug!(
        "Lookup submitted: name={:?} version={:?}",
        request.package_name, request.package_version
    );

    let started = Instant::now();
    let outcome = state.lookup.try_handle(&request).await;

    let label = match &outcome {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    metrics::counter!("npm_lookup_requests_total", "outcome" => label).increment(1);

    // Validation failures never reach the registry
    if !matches!(&outcome, Err(e) if e.is_validation()) {
        metrics::histogram!("npm_lookup_upstream_duration_seconds")
            .record(started.elapsed().as_secs_f64());
    }

    let data = outcome?;
    let body = LookupResult::Success { data }.to_json(state.response_shape);

    Ok(Json(body).into_response())
}

/// Create lookup routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(lookup_package))
        .route("/lookup", post(lookup_package))
}
