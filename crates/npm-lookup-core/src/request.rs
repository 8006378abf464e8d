//! Lookup request and validation

use serde::Deserialize;

use crate::error::LookupError;

/// A single form submission
///
/// Field names match the form inputs (`package-name`, `package-version`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupRequest {
    #[serde(rename = "package-name", default)]
    pub package_name: Option<String>,
    #[serde(rename = "package-version", default)]
    pub package_version: Option<String>,
}

/// Validated package coordinates, both trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    /// Present only when the submitted version was non-blank
    pub version: Option<String>,
}

/// `.` and `..` would be collapsed out of the request path
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

impl PackageSpec {
    /// Reject values that cannot stand as a single registry path segment
    pub fn check(&self) -> Result<(), LookupError> {
        if is_dot_segment(&self.name) {
            return Err(LookupError::InvalidSegment {
                name: self.name.clone(),
                field: "name",
                value: self.name.clone(),
            });
        }

        if let Some(version) = self.version.as_deref().filter(|v| is_dot_segment(v)) {
            return Err(LookupError::InvalidSegment {
                name: self.name.clone(),
                field: "version",
                value: version.to_string(),
            });
        }

        Ok(())
    }
}

impl LookupRequest {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
            package_version: None,
        }
    }

    pub fn with_version(mut self, package_version: impl Into<String>) -> Self {
        self.package_version = Some(package_version.into());
        self
    }

    /// Trim both fields and require a non-empty package name
    pub fn validate(&self) -> Result<PackageSpec, LookupError> {
        let name = self
            .package_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| LookupError::MissingPackageName {
                raw: self.package_name.clone(),
            })?;

        let version = self
            .package_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let spec = PackageSpec {
            name: name.to_string(),
            version,
        };
        spec.check()?;

        Ok(spec)
    }
}
