use qbank_sdk::{FeatureToggle, normalize_item, normalize_list};
use serde_json::{Value, json};

use super::fetch_json;
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::Request;

pub struct FeatureTogglesClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> FeatureTogglesClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if a toggle is malformed.
    pub async fn list(&self) -> Result<Vec<FeatureToggle>, GatewayError> {
        let body = fetch_json(self.gateway, Request::get("/feature-toggles")).await?;
        Ok(normalize_list(body, "toggles")?)
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if the toggle is malformed.
    pub async fn get(&self, name: &str) -> Result<FeatureToggle, GatewayError> {
        let body = fetch_json(self.gateway, Request::get(format!("/feature-toggles/{name}"))).await?;
        Ok(normalize_item(body, "toggle")?)
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn set(&self, name: &str, is_enabled: bool) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::patch("/feature-toggles/update")
                .json(&json!({ "name": name, "is_enabled": is_enabled }))?,
        )
        .await
    }
}
