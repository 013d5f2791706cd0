//! graphql response envelope
//!
//! the `data`/`errors` wrapper graphql servers return. `data` stays a raw
//! json value so payloads route through [`crate::decode`] and share its
//! error taxonomy.

use crate::decode::{self, DecodeError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// graphql response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse {
    /// response data or null if errors
    pub data: Option<serde_json::Value>,
    /// graphql errors array
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// true if the response contains graphql errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// decode the data payload into a generated model type
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        match &self.data {
            Some(value) => decode::from_value(value.clone()),
            None => Err(DecodeError::RequiredFieldMissing {
                path: ".".to_string(),
                field: "data".to_string(),
            }),
        }
    }
}

/// graphql error entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    /// error message
    pub message: String,
    /// error locations in the query
    #[serde(default)]
    pub locations: Vec<GraphQlLocation>,
    /// response path
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
    /// optional extensions payload
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

/// graphql error location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlLocation {
    /// line number (1-based)
    pub line: i64,
    /// column number (1-based)
    pub column: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_errors() {
        let ok: GraphQlResponse =
            serde_json::from_value(json!({"data": {"ok": true}})).unwrap();
        assert!(!ok.has_errors());

        let err: GraphQlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "boom"}],
        }))
        .unwrap();
        assert!(err.has_errors());
        assert_eq!(err.errors[0].message, "boom");
    }

    #[test]
    fn test_decode_data() {
        #[derive(Debug, serde::Deserialize)]
        struct Payload {
            value: i64,
        }

        let response: GraphQlResponse =
            serde_json::from_value(json!({"data": {"value": 7}})).unwrap();
        let payload: Payload = response.decode_data().unwrap();
        assert_eq!(payload.value, 7);
    }

    #[test]
    fn test_decode_data_missing() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "boom"}],
        }))
        .unwrap();
        let err = response.decode_data::<serde_json::Value>().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::RequiredFieldMissing { field, .. } if field == "data"
        ));
    }
}
