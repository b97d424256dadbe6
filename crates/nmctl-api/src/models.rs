// Wire-level shapes for the Netmaker API.
//
// Networks, nodes and external clients are passed around as raw JSON
// objects: updates are sent back as "existing object + overrides", so every
// server field has to survive the round trip untouched.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// A remote resource as returned by the API.
pub type Resource = Map<String, Value>;

/// `POST /users/adm/authenticate` response envelope.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "Response")]
    pub response: Option<AuthPayload>,
}

#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    #[serde(rename = "AuthToken")]
    pub auth_token: Option<String>,
}

pub(crate) fn expect_object(value: Value, context: &str) -> Result<Resource, Error> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Deserialization {
            message: format!("expected {context} object, got {}", kind(&other)),
            body: other.to_string(),
        }),
    }
}

pub(crate) fn expect_objects(value: Value, context: &str) -> Result<Vec<Resource>, Error> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| expect_object(item, context))
            .collect(),
        other => Err(Error::Deserialization {
            message: format!("expected list of {context} objects, got {}", kind(&other)),
            body: other.to_string(),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
