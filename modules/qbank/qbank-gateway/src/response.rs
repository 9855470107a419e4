use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::GatewayError;
use crate::transfer::Download;

/// HTTP response with a fully buffered body
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

impl Response {
    /// Create a response from buffered bytes
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the HTTP status code
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response headers
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Borrow the raw body
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the entire body as bytes
    #[must_use]
    pub fn bytes(self) -> Bytes {
        self.body
    }

    /// Deserialize the body as JSON. An empty body reads as `null`, so
    /// `()` and `Option<T>` work for 204-style replies.
    ///
    /// # Errors
    /// Returns `GatewayError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The body as a JSON value, or `null` when it is not JSON at all.
    #[must_use]
    pub fn json_lossy(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// Consume the response and return the body as a string
    ///
    /// # Errors
    /// Returns `GatewayError::Decode` if the body is not UTF-8.
    pub fn text(self) -> Result<String, GatewayError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| GatewayError::Decode(format!("Invalid UTF-8: {e}")))
    }

    /// Treat the body as a file download
    #[must_use]
    pub fn download(self, default_name: &str) -> Download {
        Download::from_parts(&self.headers, self.body, default_name)
    }
}
