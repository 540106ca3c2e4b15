//! Result envelopes
//!
//! Upstream bodies come back as lists, objects or bare scalars depending on
//! the operation. Each body is classified once into [`UpstreamPayload`] and
//! shaped by the endpoint's static [`ResponseShape`].

use serde_json::{Map, Value, json};

use crate::endpoint::ResponseShape;
use crate::error::SourceError;

/// Parsed upstream body, by shape
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamPayload {
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
    Scalar(Value),
}

impl From<Value> for UpstreamPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items),
            Value::Object(map) => Self::Mapping(map),
            other => Self::Scalar(other),
        }
    }
}

impl UpstreamPayload {
    /// The body exactly as parsed
    pub fn into_value(self) -> Value {
        match self {
            Self::Sequence(items) => Value::Array(items),
            Self::Mapping(map) => Value::Object(map),
            Self::Scalar(value) => value,
        }
    }
}

/// Shape a successful payload into the tool result
pub fn normalize(payload: UpstreamPayload, shape: ResponseShape) -> Value {
    match shape {
        ResponseShape::Passthrough => payload.into_value(),
        ResponseShape::Wrapped { list_key } => match payload {
            UpstreamPayload::Sequence(items) => {
                let mut listing = Map::new();
                listing.insert(list_key.to_string(), Value::Array(items));
                json!({ "result": listing })
            }
            UpstreamPayload::Mapping(map) => json!({ "result": map }),
            UpstreamPayload::Scalar(_) => json!({ "result": {} }),
        },
    }
}

/// `{"error": message}` for a failed call
pub fn error_envelope(err: &SourceError) -> Value {
    json!({ "error": err.to_string() })
}
