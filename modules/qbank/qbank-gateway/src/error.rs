use std::io;

use http::StatusCode;
use qbank_sdk::{EnvelopeError, FieldError};
use thiserror::Error;

use crate::session::CredentialError;

/// Every way a gateway call can fail.
///
/// The first six variants are the classified server outcomes. By the time one
/// of them reaches the caller the gateway has already notified the user (see
/// [`crate::Notifier`]); callers only need to react when they want more than
/// the notification, for instance attaching [`GatewayError::field_errors`] to
/// form fields. The remaining variants are local failures and are never
/// notified.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("authentication required (401)")]
    Unauthenticated,

    #[error("forbidden (403)")]
    Forbidden,

    #[error("resource not found (404)")]
    NotFound,

    #[error("validation failed with {} field error(s)", errors.len())]
    Validation { errors: Vec<FieldError> },

    #[error("server error: status={status}")]
    Server { status: StatusCode },

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    /// Any other rejected status (400, 409, ...).
    #[error("request rejected: status={status}: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("request build error: {0}")]
    Build(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl GatewayError {
    /// HTTP status behind the error, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthenticated => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden => Some(StatusCode::FORBIDDEN),
            Self::NotFound => Some(StatusCode::NOT_FOUND),
            Self::Validation { .. } => Some(StatusCode::UNPROCESSABLE_ENTITY),
            Self::Server { status } | Self::Rejected { status, .. } => Some(*status),
            Self::NetworkUnreachable(_)
            | Self::Build(_)
            | Self::Decode(_)
            | Self::Io(_)
            | Self::Credential(_) => None,
        }
    }

    /// Field-scoped messages of a validation failure; empty for anything else.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors } => errors,
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<EnvelopeError> for GatewayError {
    fn from(err: EnvelopeError) -> Self {
        Self::Decode(err.to_string())
    }
}
