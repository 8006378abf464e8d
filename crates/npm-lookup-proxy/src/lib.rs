//! npm Lookup Upstream Proxy
//!
//! This crate provides the outbound side of the lookup service: the
//! `RegistryFetcher` capability and its reqwest-backed npm registry client.

pub mod client;
pub mod error;
pub mod fetcher;

pub use client::{NpmClientConfig, NpmRegistryClient, DEFAULT_REGISTRY_URL};
pub use error::ProxyError;
pub use fetcher::{RegistryFetcher, UpstreamResponse};
