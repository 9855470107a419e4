use qbank_sdk::{LoginRequest, LoginResponse, RegisterRequest};
use serde_json::{Value, json};
use tracing::info;

use super::fetch_json;
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::Request;
use crate::session::BearerToken;

/// Sign-in and account recovery.
pub struct AuthClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Sign in and store the returned token in the session.
    ///
    /// # Errors
    /// Classified gateway errors, or `Credential` if the token cannot be stored.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, GatewayError> {
        let body = fetch_json(
            self.gateway,
            Request::post("/authentication/login").json(credentials)?,
        )
        .await?;
        let login: LoginResponse = serde_json::from_value(body)?;
        self.gateway
            .session()
            .set_credential(BearerToken::new(login.token.clone()))?;
        info!(user_id = login.user.as_ref().map(|u| u.id), "signed in");
        Ok(login)
    }

    /// Forget the session credential. No request is made.
    ///
    /// # Errors
    /// Returns `Credential` if the stored token cannot be removed.
    pub fn logout(&self) -> Result<(), GatewayError> {
        self.gateway.session().clear_credential()?;
        Ok(())
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn register(&self, user: &RegisterRequest) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::post("/authentication/register").json(user)?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn forgot_password(&self, email: &str) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::post("/authentication/forgot-password").json(&json!({ "email": email }))?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::post("/authentication/reset-password")
                .json(&json!({ "token": token, "password": password }))?,
        )
        .await
    }
}
