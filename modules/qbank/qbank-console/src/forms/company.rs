use std::sync::LazyLock;

use qbank_gateway::{Gateway, GatewayError, Notice};
use qbank_sdk::{CompanyPayload, User};
use regex::Regex;
use tracing::debug;
use validator::{Validate, ValidationError};

use super::{FormErrors, FormMode, MOBILE_NUMBER, not_blank, optional};
use crate::error::ViewError;

/// Indian GST identification number: state code, PAN, entity number, `Z`,
/// check character.
#[allow(clippy::unwrap_used)]
static GST_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z]{1}[1-9A-Z]{1}Z[0-9A-Z]{1}$").unwrap()
});

#[allow(clippy::unwrap_used)]
static PINCODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

pub const DEFAULT_COUNTRY: &str = "India";

/// Form fields of the company create/edit screen.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CompanyFormValues {
    #[validate(custom(function = "not_blank", message = "Company name is required"))]
    pub company_name: String,

    #[validate(
        custom(function = "not_blank", message = "GST number is required"),
        regex(path = *GST_NUMBER, message = "Invalid GST number format")
    )]
    pub gst_number: String,

    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,

    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,

    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "Mobile number is required"),
        regex(path = *MOBILE_NUMBER, message = "Mobile number must be 10 digits")
    )]
    pub mobile_number: String,

    #[validate(custom(function = "not_blank", message = "Address is required"))]
    pub address: String,

    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,

    #[validate(custom(function = "not_blank", message = "State is required"))]
    pub state: String,

    #[validate(custom(function = "not_blank", message = "Country is required"))]
    pub country: String,

    #[validate(
        custom(function = "not_blank", message = "Pincode is required"),
        regex(path = *PINCODE, message = "Pincode must be 6 digits")
    )]
    pub pincode: String,

    #[validate(custom(function = "optional_url", message = "Invalid website URL"))]
    pub website: String,

    pub industry: String,
    pub description: String,
}

impl Default for CompanyFormValues {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            gst_number: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            mobile_number: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: DEFAULT_COUNTRY.to_owned(),
            pincode: String::new(),
            website: String::new(),
            industry: String::new(),
            description: String::new(),
        }
    }
}

/// Blank, or an absolute http(s) or ftp URL with a host.
fn optional_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let web_url = url::Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https" | "ftp") && url.has_host());
    if value.is_empty() || web_url {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

impl CompanyFormValues {
    /// Initial values for editing an existing company.
    #[must_use]
    pub fn from_company(company: &User) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            company_name: text(&company.company_name),
            gst_number: text(&company.gst_number),
            first_name: text(&company.first_name),
            last_name: text(&company.last_name),
            email: text(&company.email),
            mobile_number: text(&company.mobile_number),
            address: text(&company.address),
            city: text(&company.city),
            state: text(&company.state),
            country: company
                .country
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
            pincode: text(&company.pincode),
            website: text(&company.website),
            industry: text(&company.industry),
            description: text(&company.company_description),
        }
    }

    /// The request body: values trimmed, empty optionals omitted.
    #[must_use]
    pub fn to_payload(&self) -> CompanyPayload {
        CompanyPayload {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            mobile_number: self.mobile_number.trim().to_owned(),
            company_name: self.company_name.trim().to_owned(),
            gst_number: self.gst_number.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            country: self.country.trim().to_owned(),
            pincode: self.pincode.trim().to_owned(),
            website: optional(&self.website),
            industry: optional(&self.industry),
            company_description: optional(&self.description),
        }
    }
}

/// Backend field name to form field name.
fn ui_field(backend: &str) -> &str {
    match backend {
        "company_description" => "description",
        other => other,
    }
}

/// The company create/edit form.
pub struct CompanyForm<'g> {
    gateway: &'g Gateway,
    mode: FormMode,
    pub values: CompanyFormValues,
    errors: FormErrors,
    loading: bool,
    submitting: bool,
}

impl<'g> CompanyForm<'g> {
    #[must_use]
    pub fn new(gateway: &'g Gateway, mode: FormMode) -> Self {
        Self {
            gateway,
            mode,
            values: CompanyFormValues::default(),
            errors: FormErrors::new(),
            loading: false,
            submitting: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// In edit mode, fetch the company and reinitialize the values from it.
    ///
    /// # Errors
    /// Returns the gateway error if the company cannot be loaded.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        let FormMode::Edit(id) = self.mode else {
            return Ok(());
        };
        self.loading = true;
        let result = self.gateway.companies().get(id).await;
        self.loading = false;

        let company = result?;
        self.values = CompanyFormValues::from_company(&company);
        self.errors = FormErrors::new();
        Ok(())
    }

    /// Run the local rules, replacing the current errors.
    pub fn validate(&mut self) -> bool {
        self.errors = match self.values.validate() {
            Ok(()) => FormErrors::new(),
            Err(errors) => FormErrors::from_validation(&errors),
        };
        self.errors.is_empty()
    }

    /// Validate, then create or update the company with exactly one call.
    ///
    /// # Errors
    /// `Invalid` with per-field messages for local or backend validation
    /// failures; the gateway error for anything else.
    pub async fn submit(&mut self) -> Result<(), ViewError> {
        if !self.validate() {
            debug!(fields = self.errors.len(), "company form rejected locally");
            return Err(ViewError::Invalid(self.errors.clone()));
        }

        let payload = self.values.to_payload();
        self.submitting = true;
        let result = match self.mode {
            FormMode::Create => self.gateway.companies().create(&payload).await,
            FormMode::Edit(id) => self.gateway.companies().update(id, &payload).await,
        };
        self.submitting = false;

        match result {
            Ok(_) => {
                let message = match self.mode {
                    FormMode::Create => "Company created successfully!",
                    FormMode::Edit(_) => "Company updated successfully!",
                };
                self.gateway.notify(Notice::success(message));
                Ok(())
            }
            Err(GatewayError::Validation { errors }) if !errors.is_empty() => {
                self.errors = FormErrors::from_backend(&errors, ui_field);
                Err(ViewError::Invalid(self.errors.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
