//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use npm_lookup_core::{LookupError, LookupResult, ResponseShape};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl ApiError {
    fn into_result(self) -> LookupResult {
        match self {
            ApiError::BadRequest(msg) => LookupResult::Failure {
                status_code: StatusCode::BAD_REQUEST.as_u16(),
                message: msg,
                name: None,
            },
            ApiError::Lookup(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let result = self.into_result();

        // Registry statuses outside 100..=999 cannot be sent as-is
        let status = StatusCode::from_u16(result.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);

        // Failures render the same under every shape
        let body = axum::Json(result.to_json(ResponseShape::Tagged));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_status() {
        let response = ApiError::from(LookupError::NotFound {
            name: "left-pad".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from(LookupError::UpstreamStatus {
            name: "left-pad".to_string(),
            status: 429,
            status_text: "Too Many Requests".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_bad_request() {
        let response = ApiError::BadRequest("Missing form body".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
