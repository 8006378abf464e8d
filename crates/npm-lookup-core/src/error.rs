//! Lookup error types
//!
//! `Display` on each variant is the message reported back to the submitter,
//! so transport causes are kept as `source` and never formatted into it.

use npm_lookup_proxy::ProxyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Package name is required")]
    MissingPackageName { raw: Option<String> },

    #[error("Invalid package {field}: \"{value}\"")]
    InvalidSegment {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("Package \"{name}\" not found")]
    NotFound { name: String },

    #[error("Failed to fetch package data: {status_text}")]
    UpstreamStatus {
        name: String,
        status: u16,
        status_text: String,
    },

    #[error("Network error occurred while fetching package data")]
    Transport {
        name: String,
        #[source]
        source: ProxyError,
    },

    #[error("Network error occurred while fetching package data")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid registry URL: {0}")]
    InvalidRegistryUrl(String),
}

impl LookupError {
    /// Status code reported to the submitter
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::MissingPackageName { .. } | LookupError::InvalidSegment { .. } => 400,
            LookupError::NotFound { .. } => 404,
            LookupError::UpstreamStatus { status, .. } => *status,
            LookupError::Transport { .. }
            | LookupError::Decode { .. }
            | LookupError::InvalidRegistryUrl(_) => 500,
        }
    }

    /// Package name to redisplay: the raw input for validation failures,
    /// the trimmed name otherwise
    pub fn name(&self) -> Option<&str> {
        match self {
            LookupError::MissingPackageName { raw } => raw.as_deref(),
            LookupError::InvalidSegment { name, .. }
            | LookupError::NotFound { name }
            | LookupError::UpstreamStatus { name, .. }
            | LookupError::Transport { name, .. }
            | LookupError::Decode { name, .. } => Some(name),
            LookupError::InvalidRegistryUrl(_) => None,
        }
    }

    /// Whether the failure was caught before any registry request
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LookupError::MissingPackageName { .. } | LookupError::InvalidSegment { .. }
        )
    }

    /// Short label for the failure class, used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::MissingPackageName { .. } | LookupError::InvalidSegment { .. } => {
                "validation_error"
            }
            LookupError::NotFound { .. } => "not_found",
            LookupError::UpstreamStatus { .. } => "upstream_error",
            LookupError::Transport { .. } | LookupError::Decode { .. } => "transport_error",
            LookupError::InvalidRegistryUrl(_) => "config_error",
        }
    }
}
