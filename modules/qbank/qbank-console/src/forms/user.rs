use qbank_gateway::{Gateway, GatewayError, MSG_GENERIC, Notice, StatusCode};
use qbank_sdk::{ListParams, Role, UpdateUserRequest, User};
use tracing::debug;
use validator::{Validate, ValidationError};

use super::{FormErrors, MOBILE_NUMBER, not_blank};
use crate::error::ViewError;

const PASSWORD_SPECIALS: &str = "@$!%*?&";
const MSG_DUPLICATE_CONTACT: &str = "This email or mobile number is already in use";

/// Form fields of the user edit screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UserFormValues {
    #[validate(
        custom(function = "not_blank", message = "First name is required"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = "not_blank", message = "Last name is required"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    pub last_name: String,

    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "Mobile number is required"),
        regex(path = *MOBILE_NUMBER, message = "Mobile number must be 10 digits")
    )]
    pub mobile_number: String,

    /// Left empty to keep the current password.
    #[validate(custom(
        function = "password_strength",
        message = "Password must be at least 8 characters and include an uppercase letter, a lowercase letter, a number and a special character"
    ))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,

    #[validate(length(min = 1, message = "At least one role must be assigned"))]
    pub role_ids: Vec<i64>,

    pub is_active: bool,
}

fn password_strength(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let strong = value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if strong {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength"))
    }
}

impl UserFormValues {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            first_name: text(&user.first_name),
            last_name: text(&user.last_name),
            email: text(&user.email),
            mobile_number: text(&user.mobile_number),
            password: String::new(),
            confirm_password: String::new(),
            role_ids: user.role_ids(),
            is_active: user.is_active,
        }
    }

    #[must_use]
    pub fn to_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            mobile_number: self.mobile_number.trim().to_owned(),
            roles: self.role_ids.clone(),
            is_active: self.is_active,
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        }
    }
}

fn ui_field(backend: &str) -> &str {
    match backend {
        "roles" => "role_ids",
        other => other,
    }
}

/// Edits an existing user: profile, password, roles and active flag.
pub struct UserEditForm<'g> {
    gateway: &'g Gateway,
    user_id: i64,
    pub values: UserFormValues,
    roles: Vec<Role>,
    errors: FormErrors,
    banner: Option<String>,
}

impl<'g> UserEditForm<'g> {
    #[must_use]
    pub fn new(gateway: &'g Gateway, user_id: i64) -> Self {
        Self {
            gateway,
            user_id,
            values: UserFormValues::default(),
            roles: Vec::new(),
            errors: FormErrors::new(),
            banner: None,
        }
    }

    /// Roles the user can be assigned.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    #[must_use]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Form-level message shown above the fields.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Fetch the user and the assignable roles together.
    ///
    /// # Errors
    /// Returns the first gateway failure; nothing is applied in that case.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        let users = self.gateway.users();
        let roles = self.gateway.roles();
        let params = ListParams::new();
        let (user, roles) = futures::try_join!(users.get(self.user_id), roles.list(&params))?;

        self.values = UserFormValues::from_user(&user);
        self.roles = roles;
        self.errors = FormErrors::new();
        self.banner = None;
        Ok(())
    }

    pub fn validate(&mut self) -> bool {
        self.errors = match self.values.validate() {
            Ok(()) => FormErrors::new(),
            Err(errors) => FormErrors::from_validation(&errors),
        };
        self.errors.is_empty()
    }

    /// Validate and send the update.
    ///
    /// # Errors
    /// `Invalid` for local or backend field errors; on a conflict the banner
    /// is set and the gateway error returned.
    pub async fn submit(&mut self) -> Result<(), ViewError> {
        self.banner = None;
        if !self.validate() {
            debug!(user_id = self.user_id, fields = self.errors.len(), "user form rejected locally");
            return Err(ViewError::Invalid(self.errors.clone()));
        }

        let request = self.values.to_request();
        match self.gateway.users().update(self.user_id, &request).await {
            Ok(_) => {
                self.values.password.clear();
                self.values.confirm_password.clear();
                self.gateway.notify(Notice::success("User updated successfully!"));
                Ok(())
            }
            Err(GatewayError::Validation { errors }) if !errors.is_empty() => {
                self.errors = FormErrors::from_backend(&errors, ui_field);
                Err(ViewError::Invalid(self.errors.clone()))
            }
            Err(GatewayError::Rejected { status, message }) if status == StatusCode::CONFLICT => {
                let text = if message == MSG_GENERIC {
                    MSG_DUPLICATE_CONTACT.to_owned()
                } else {
                    message.clone()
                };
                self.banner = Some(text);
                Err(GatewayError::Rejected { status, message }.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
