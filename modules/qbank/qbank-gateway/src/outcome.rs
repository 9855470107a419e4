use http::StatusCode;
use qbank_sdk::backend_message;
use serde_json::Value;

/// Result of a call made with [`crate::StatusPolicy::TolerateClientErrors`].
///
/// A 4xx reply is not an error at this level: the caller receives the status
/// and body and decides what to show. No notification has been produced for
/// it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    ClientError { status: StatusCode, body: Value },
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, discarding a client error.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::ClientError { .. } => None,
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::ClientError { status, body } => Outcome::ClientError { status, body },
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Success(_) => None,
            Self::ClientError { status, .. } => Some(*status),
        }
    }

    /// Backend `error`/`message` text of a client error.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::ClientError { body, .. } => backend_message(body),
        }
    }
}
