//! Response envelopes
//!
//! Every successful JSON response has exactly one key, `data`, holding the
//! normalized payload. Errors use [`crate::account::ErrorResponse`].

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::account::AccountError;

/// Unified success wrapper: `{"data": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl Envelope<Value> {
    /// Normalize any serializable value into plain JSON data and wrap it.
    pub fn normalize<T: Serialize + ?Sized>(value: &T) -> Result<Self, AccountError> {
        serde_json::to_value(value)
            .map(Self::new)
            .map_err(|e| AccountError::internal(format!("Failed to normalize response: {}", e)))
    }
}

/// Body returned by a successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct ContextTokenResponse {
    #[serde(rename = "x-sw-context-token")]
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9...")]
    pub context_token: String,
}

impl ContextTokenResponse {
    pub fn new(context_token: String) -> Self {
        Self { context_token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        first_name: String,
        tags: Vec<u8>,
    }

    #[test]
    fn test_envelope_has_single_data_key() {
        let env = Envelope::normalize(&Sample {
            first_name: "Max".into(),
            tags: vec![1, 2],
        })
        .unwrap();
        let json = serde_json::to_value(&env).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(json["data"], json!({"firstName": "Max", "tags": [1, 2]}));
    }

    #[test]
    fn test_empty_collection_is_empty_array() {
        let empty: Vec<Sample> = Vec::new();
        let json = serde_json::to_value(Envelope::normalize(&empty).unwrap()).unwrap();
        assert_eq!(json, json!({"data": []}));
    }

    #[test]
    fn test_scalar_payload() {
        let json = serde_json::to_value(Envelope::new("abc")).unwrap();
        assert_eq!(json, json!({"data": "abc"}));
    }

    #[test]
    fn test_context_token_key() {
        let json = serde_json::to_value(ContextTokenResponse::new("tok".into())).unwrap();
        assert_eq!(json, json!({"x-sw-context-token": "tok"}));
    }
}
