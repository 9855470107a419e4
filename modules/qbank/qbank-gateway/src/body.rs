use bytes::Bytes;
use serde::Serialize;

use crate::error::GatewayError;
use crate::transfer::Upload;

/// HTTP request body abstraction
#[derive(Debug, Default)]
pub enum Body {
    /// Empty body
    #[default]
    Empty,
    /// Serialized JSON document
    Json(Bytes),
    /// Multipart form carrying one file
    Multipart(Upload),
}

impl Body {
    /// Create a body from a JSON-serializable value
    ///
    /// # Errors
    /// Returns `GatewayError::Decode` if the value cannot be serialized.
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, GatewayError> {
        let json = serde_json::to_vec(value)?;
        Ok(Self::Json(Bytes::from(json)))
    }

    /// Check if body is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// JSON text for diagnostics; multipart bodies are summarized.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Json(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Self::Multipart(upload) => {
                format!("<multipart {} ({} bytes)>", upload.file_name(), upload.len())
            }
        }
    }
}

impl From<Upload> for Body {
    fn from(upload: Upload) -> Self {
        Self::Multipart(upload)
    }
}
