//! npm Lookup Core Business Logic
//!
//! This crate turns a submitted package name (and optional version) into a
//! single registry request and maps the response onto a `LookupResult`.

pub mod error;
pub mod handler;
pub mod request;
pub mod result;

pub use error::LookupError;
pub use handler::RegistryLookupHandler;
pub use request::{LookupRequest, PackageSpec};
pub use result::{LookupResult, ResponseShape};
