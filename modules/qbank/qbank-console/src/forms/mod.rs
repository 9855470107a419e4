//! Create/edit forms: local validation, submission and mapping of backend
//! validation errors back onto form fields.

mod company;
mod user;

pub use company::{CompanyForm, CompanyFormValues, DEFAULT_COUNTRY};
pub use user::{UserEditForm, UserFormValues};

use std::collections::BTreeMap;
use std::sync::LazyLock;

use qbank_sdk::FieldError;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// Ten-digit mobile number, shared by the company and user forms.
#[allow(clippy::unwrap_used)]
pub(crate) static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Error messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    /// Local validation failures, showing the first failed rule per field.
    #[must_use]
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut form_errors = Self::new();
        for (field, field_errors) in errors.field_errors() {
            let field: &str = &field;
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_deref()
                    .map_or_else(|| first.code.to_string(), str::to_owned);
                form_errors.add(field, message);
            }
        }
        form_errors
    }

    /// Backend 422 errors; every message is kept, under the UI field name
    /// chosen by `ui_field`.
    #[must_use]
    pub fn from_backend(errors: &[FieldError], ui_field: impl Fn(&str) -> &str) -> Self {
        let mut form_errors = Self::new();
        for error in errors {
            form_errors.add(ui_field(error.param.as_str()), error.msg.clone());
        }
        form_errors
    }

    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of messages across all fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Required-field rule for `String` inputs; whitespace counts as empty.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// `Some(trimmed)` unless the input is blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_keep_every_message() {
        let errors = [
            FieldError::new("email", "Email already registered"),
            FieldError::new("email", "Email domain is blocked"),
            FieldError::new("roles", "Unknown role"),
        ];
        let mapped = FormErrors::from_backend(&errors, |field| match field {
            "roles" => "role_ids",
            other => other,
        });

        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped.messages("email").len(), 2);
        assert_eq!(mapped.first("role_ids"), Some("Unknown role"));
        assert!(mapped.messages("roles").is_empty());
    }

    #[test]
    fn optional_trims_and_drops_blank() {
        assert_eq!(optional("  https://acme.test "), Some("https://acme.test".to_owned()));
        assert_eq!(optional("   "), None);
    }
}
