use qbank_sdk::{AssignPermissionsRequest, Permission, normalize_item, normalize_list};
use serde::Serialize;
use serde_json::{Value, json};

use super::fetch_json;
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::Request;

const BASE: &str = "/permission_management";

/// Permission management.
pub struct PermissionsClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> PermissionsClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if a permission is malformed.
    pub async fn list(&self) -> Result<Vec<Permission>, GatewayError> {
        let body = fetch_json(self.gateway, Request::get(format!("{BASE}/permissions"))).await?;
        Ok(normalize_list(body, "permissions")?)
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if the permission is malformed.
    pub async fn get(&self, id: i64) -> Result<Permission, GatewayError> {
        let body = fetch_json(self.gateway, Request::get(format!("{BASE}/permissions/{id}"))).await?;
        Ok(normalize_item(body, "permission")?)
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn create<B: Serialize + ?Sized>(&self, permission: &B) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::post(format!("{BASE}/permissions")).json(permission)?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: i64,
        permission: &B,
    ) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::put(format!("{BASE}/permissions/{id}")).json(permission)?,
        )
        .await
    }

    /// Replace the permissions granted to a role.
    ///
    /// # Errors
    /// Classified gateway errors.
    pub async fn assign(&self, assignment: &AssignPermissionsRequest) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::post(format!("{BASE}/assign")).json(assignment)?).await
    }

    /// Backend routes that have no permission record yet.
    ///
    /// # Errors
    /// Classified gateway errors.
    pub async fn missing_routes(&self) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::get(format!("{BASE}/missing-routes"))).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn create_missing_routes<B: Serialize>(
        &self,
        permissions: &[B],
    ) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::post(format!("{BASE}/create-missing-routes"))
                .json(&json!({ "permissions": permissions }))?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn roles_with_permissions(&self) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::get(format!("{BASE}/roles-permissions"))).await
    }
}
