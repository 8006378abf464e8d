//! Lookup result and its JSON rendering

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::LookupError;

/// How a successful lookup is rendered as JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// `{"success": true, "data": <registry JSON>}`
    #[default]
    Tagged,
    /// Registry fields with `"success": true` added alongside them
    Merged,
}

/// Outcome of a single lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Success {
        data: Value,
    },
    Failure {
        status_code: u16,
        message: String,
        name: Option<String>,
    },
}

impl LookupResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupResult::Success { .. })
    }

    /// HTTP status to report (200 on success)
    pub fn status_code(&self) -> u16 {
        match self {
            LookupResult::Success { .. } => 200,
            LookupResult::Failure { status_code, .. } => *status_code,
        }
    }

    pub fn to_json(&self, shape: ResponseShape) -> Value {
        match self {
            LookupResult::Success { data } => match (shape, data) {
                (ResponseShape::Merged, Value::Object(fields)) => {
                    let mut merged = Map::with_capacity(fields.len() + 1);
                    merged.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
                    merged.insert("success".to_string(), Value::Bool(true));
                    Value::Object(merged)
                }
                _ => json!({ "success": true, "data": data }),
            },
            LookupResult::Failure {
                status_code,
                message,
                name,
            } => json!({
                "success": false,
                "status": status_code,
                "message": message,
                "name": name,
            }),
        }
    }
}

impl From<LookupError> for LookupResult {
    fn from(err: LookupError) -> Self {
        LookupResult::Failure {
            status_code: err.status_code(),
            message: err.to_string(),
            name: err.name().map(str::to_string),
        }
    }
}

impl From<Result<Value, LookupError>> for LookupResult {
    fn from(outcome: Result<Value, LookupError>) -> Self {
        match outcome {
            Ok(data) => LookupResult::Success { data },
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_success() {
        let result = LookupResult::Success {
            data: json!({"name": "lodash", "success": "upstream"}),
        };

        assert_eq!(
            result.to_json(ResponseShape::Tagged),
            json!({"success": true, "data": {"name": "lodash", "success": "upstream"}})
        );
    }

    #[test]
    fn test_merged_success() {
        let result = LookupResult::Success {
            data: json!({"name": "left-pad", "version": "1.3.0"}),
        };

        assert_eq!(
            result.to_json(ResponseShape::Merged),
            json!({"success": true, "name": "left-pad", "version": "1.3.0"})
        );
    }

    #[test]
    fn test_merged_non_object_falls_back_to_tagged() {
        let result = LookupResult::Success {
            data: json!(["a", "b"]),
        };

        assert_eq!(
            result.to_json(ResponseShape::Merged),
            json!({"success": true, "data": ["a", "b"]})
        );
    }

    #[test]
    fn test_failure_from_error() {
        let result: LookupResult = LookupError::MissingPackageName {
            raw: Some("  ".to_string()),
        }
        .into();

        assert_eq!(
            result,
            LookupResult::Failure {
                status_code: 400,
                message: "Package name is required".to_string(),
                name: Some("  ".to_string()),
            }
        );
        assert_eq!(
            result.to_json(ResponseShape::Merged),
            json!({
                "success": false,
                "status": 400,
                "message": "Package name is required",
                "name": "  ",
            })
        );
    }

    #[test]
    fn test_shape_from_config_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            shape: ResponseShape,
        }

        let w: Wrapper = serde_json::from_str(r#"{"shape":"merged"}"#).unwrap();
        assert_eq!(w.shape, ResponseShape::Merged);
        assert_eq!(ResponseShape::default(), ResponseShape::Tagged);
    }
}
