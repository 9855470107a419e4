use qbank_sdk::{ListParams, Permission, Role, normalize_item, normalize_list};
use serde::Serialize;
use serde_json::{Value, json};

use super::fetch_json;
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::Request;
use crate::transfer::{Download, Upload};

const ROLES: &str = "/role_management/roles";

/// Role management.
pub struct RolesClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> RolesClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// All roles, whichever envelope the backend wraps them in.
    ///
    /// # Errors
    /// Classified gateway errors, or `Decode` if a role is malformed.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Role>, GatewayError> {
        let body = fetch_json(self.gateway, Request::get(ROLES).query_pairs(params.to_query())).await?;
        Ok(normalize_list(body, "roles")?)
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if the role is malformed.
    pub async fn get(&self, id: i64) -> Result<Role, GatewayError> {
        let body = fetch_json(self.gateway, Request::get(format!("{ROLES}/{id}"))).await?;
        Ok(normalize_item(body, "role")?)
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn create<B: Serialize + ?Sized>(&self, role: &B) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::post(ROLES).json(role)?).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, role: &B) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::put(format!("{ROLES}/{id}")).json(role)?).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        fetch_json(self.gateway, Request::delete(format!("{ROLES}/{id}"))).await?;
        Ok(())
    }

    /// Permissions that can be attached to a role.
    ///
    /// # Errors
    /// Classified gateway errors, or `Decode` if a permission is malformed.
    pub async fn available_permissions(&self) -> Result<Vec<Permission>, GatewayError> {
        let body = fetch_json(self.gateway, Request::get("/role_management/permissions")).await?;
        Ok(normalize_list(body, "permissions")?)
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn bulk_upload(&self, file: Upload) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::post(format!("{ROLES}/bulk")).upload(file)).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn bulk_delete(&self, role_ids: &[i64]) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::delete(format!("{ROLES}/bulk-delete")).json(&json!({ "roleIds": role_ids }))?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn download_template(&self) -> Result<Download, GatewayError> {
        let request = Request::get(format!("{ROLES}/template")).build()?;
        let response = self.gateway.execute(request).await?;
        Ok(response.download("role-template.csv"))
    }
}
