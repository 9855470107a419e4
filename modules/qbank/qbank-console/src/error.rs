use qbank_gateway::{GatewayError, StatusCode};
use thiserror::Error;

use crate::forms::FormErrors;

/// Why a view operation did not complete.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The current user lacks the named permission.
    #[error("missing permission: {0}")]
    AccessDenied(&'static str),

    #[error("{0} not found")]
    NotFound(String),

    /// Local or backend validation failed; messages are keyed by form field.
    #[error("form has invalid fields")]
    Invalid(FormErrors),

    /// A tolerant endpoint answered with a client error.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ViewError {
    /// The gateway status behind the failure, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Gateway(err) => err.status(),
            Self::AccessDenied(_) | Self::NotFound(_) | Self::Invalid(_) => None,
        }
    }
}
