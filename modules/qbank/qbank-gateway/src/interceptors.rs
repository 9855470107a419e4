//! Request/response interceptors: diagnostics logging on the way out and in,
//! and classification plus user notification of failed calls.

use bytes::Bytes;
use http::StatusCode;
use qbank_sdk::{ValidationErrorBody, backend_message};
use serde_json::Value;
use tracing::{debug, error, trace};

use crate::error::GatewayError;
use crate::hooks::{Hooks, Notice};
use crate::request::Request;
use crate::response::Response;
use crate::session::Session;

pub const MSG_SESSION_EXPIRED: &str = "Authentication session expired. Please log in again.";
pub const MSG_FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const MSG_NOT_FOUND: &str = "The requested resource was not found.";
pub const MSG_VALIDATION: &str = "Validation error. Please check your input.";
pub const MSG_SERVER_ERROR: &str = "Server error. Please try again later or contact support.";
pub const MSG_UNREACHABLE: &str =
    "Unable to connect to server. Please check your internet connection.";
pub const MSG_GENERIC: &str = "An error occurred. Please try again.";

pub(crate) fn log_request(url: &str, request: &Request) {
    debug!(
        method = %request.method(),
        url,
        query = ?request.query(),
        payload = %request.body().describe(),
        "API request"
    );
}

pub(crate) fn log_response(url: &str, response: &Response) {
    debug!(url, status = response.status().as_u16(), "API response");
    trace!(url, body = %String::from_utf8_lossy(response.body()), "API response body");
}

/// Map a rejected response onto the error taxonomy.
pub(crate) fn classify(status: StatusCode, body: &Bytes) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthenticated,
        StatusCode::FORBIDDEN => GatewayError::Forbidden,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => {
            let parsed: ValidationErrorBody = serde_json::from_slice(body).unwrap_or_default();
            GatewayError::Validation {
                errors: parsed.errors,
            }
        }
        status if status.is_server_error() => GatewayError::Server { status },
        status => {
            let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
            let message = backend_message(&value).unwrap_or(MSG_GENERIC).to_owned();
            GatewayError::Rejected { status, message }
        }
    }
}

/// Apply the side effects of a failed call before it propagates.
///
/// Exactly one notice per failure, except validation failures which produce
/// one per field error. A lost session additionally clears the credential and
/// navigates to the login screen once.
pub(crate) fn report(err: &GatewayError, url: &str, session: &Session, hooks: &Hooks) {
    error!(url, error = %err, "API error");

    let notify = |message: &str| hooks.notifier.notify(Notice::error(message));
    match err {
        GatewayError::Unauthenticated => {
            notify(MSG_SESSION_EXPIRED);
            session.expire();
            hooks.navigator.to_login();
        }
        GatewayError::Forbidden => notify(MSG_FORBIDDEN),
        GatewayError::NotFound => notify(MSG_NOT_FOUND),
        GatewayError::Validation { errors } if errors.is_empty() => notify(MSG_VALIDATION),
        GatewayError::Validation { errors } => {
            for field_error in errors {
                notify(&field_error.msg);
            }
        }
        GatewayError::Server { .. } => notify(MSG_SERVER_ERROR),
        GatewayError::NetworkUnreachable(_) => notify(MSG_UNREACHABLE),
        GatewayError::Rejected { message, .. } => notify(message),
        GatewayError::Build(_)
        | GatewayError::Decode(_)
        | GatewayError::Io(_)
        | GatewayError::Credential(_) => {}
    }
}
