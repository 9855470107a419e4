use qbank_sdk::{ActivityLog, ListParams, Page, normalize_page};
use serde_json::Value;

use super::fetch_json;
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::Request;

/// Audit trail of user actions.
pub struct ActivityLogsClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> ActivityLogsClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if an entry is malformed.
    pub async fn list(&self, params: &ListParams) -> Result<Page<ActivityLog>, GatewayError> {
        let body = fetch_json(
            self.gateway,
            Request::get("/logging/activity").query_pairs(params.to_query()),
        )
        .await?;
        Ok(normalize_page(body, "logs")?)
    }

    /// Distinct action names, for filtering.
    ///
    /// # Errors
    /// Classified gateway errors.
    pub async fn action_types(&self) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::get("/logging/actions")).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn entity_types(&self) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::get("/logging/entities")).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn stats(&self) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::get("/logging/stats")).await
    }
}
