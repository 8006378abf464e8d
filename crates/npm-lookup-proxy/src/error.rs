//! Proxy error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl ProxyError {
    /// Whether the failure was the client-side request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProxyError::Http(e) if e.is_timeout())
    }
}
