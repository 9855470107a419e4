use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single field-scoped validation error as reported by the backend on 422.
///
/// Older backend builds name the field `param`, newer ones `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(alias = "path")]
    pub param: String,
    pub msg: String,
}

impl FieldError {
    #[must_use]
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            msg: msg.into(),
        }
    }
}

/// Body shape of a 422 response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationErrorBody {
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// Errors from decoding a backend envelope.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("envelope decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Pick the human readable message out of an error body.
///
/// The backend reports it under `error` or, for some routes, `message`.
#[must_use]
pub fn backend_message(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .filter(|msg| !msg.is_empty())
}
