//! Error types used throughout the tooling

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for dancefloor
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DanceFloorError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The REST gateway answered with a status the caller could not accept.
    #[error("{message}: {status}")]
    Rest { status: u16, message: String },

    #[error("Process error: {0}")]
    Process(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DanceFloorError {
    /// Build a [`DanceFloorError::Rest`] from a rejected response.
    pub fn rest(status: u16, context: impl Into<String>, body: &serde_json::Value) -> Self {
        let context = context.into();
        let message = match body {
            serde_json::Value::Null => context,
            serde_json::Value::String(text) if text.is_empty() => context,
            other => format!("{context} ({other})"),
        };
        Self::Rest { status, message }
    }
}

/// Result type alias for dancefloor operations
pub type Result<T> = std::result::Result<T, DanceFloorError>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rest_error_includes_body_when_present() {
        let err = DanceFloorError::rest(409, "Failed to create location", &json!({"code": "23505"}));
        assert_eq!(err.to_string(), r#"Failed to create location ({"code":"23505"}): 409"#);
    }

    #[test]
    fn rest_error_omits_empty_body() {
        let err = DanceFloorError::rest(500, "Failed to add windows", &json!(""));
        assert_eq!(err.to_string(), "Failed to add windows: 500");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = DanceFloorError::Config("missing key".into());
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"type": "Config", "message": "missing key"}));
    }
}
