use qbank_sdk::{
    BulkRoleAssignment, ListParams, Page, StatusUpdate, UpdateUserRequest, User, normalize_item,
    normalize_page,
};
use serde::Serialize;
use serde_json::{Value, json};

use super::fetch_json;
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::Request;
use crate::transfer::{Download, Upload};

const USERS: &str = "/user_management/users";

/// User management.
pub struct UsersClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if a user record is malformed.
    pub async fn list(&self, params: &ListParams) -> Result<Page<User>, GatewayError> {
        let body = fetch_json(self.gateway, Request::get(USERS).query_pairs(params.to_query())).await?;
        Ok(normalize_page(body, "users")?)
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if the record is malformed.
    pub async fn get(&self, id: i64) -> Result<User, GatewayError> {
        let body = fetch_json(self.gateway, Request::get(format!("{USERS}/{id}"))).await?;
        Ok(normalize_item(body, "user")?)
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn create<B: Serialize + ?Sized>(&self, user: &B) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::post(USERS).json(user)?).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn update(&self, id: i64, user: &UpdateUserRequest) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::put(format!("{USERS}/{id}")).json(user)?).await
    }

    /// Activate or deactivate one account.
    ///
    /// # Errors
    /// Classified gateway errors.
    pub async fn set_status(&self, id: i64, is_active: bool) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::patch(format!("{USERS}/{id}/status")).json(&StatusUpdate { is_active })?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        fetch_json(self.gateway, Request::delete(format!("{USERS}/{id}"))).await?;
        Ok(())
    }

    /// Create users from a CSV file.
    ///
    /// # Errors
    /// Classified gateway errors.
    pub async fn bulk_upload(&self, file: Upload) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::post(format!("{USERS}/bulk")).upload(file)).await
    }

    /// The CSV template for [`Self::bulk_upload`].
    ///
    /// # Errors
    /// Classified gateway errors.
    pub async fn download_template(&self) -> Result<Download, GatewayError> {
        let request = Request::get(format!("{USERS}/template")).build()?;
        let response = self.gateway.execute(request).await?;
        Ok(response.download("user-template.csv"))
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn bulk_delete(&self, user_ids: &[i64]) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::delete(format!("{USERS}/bulk-delete")).json(&json!({ "userIds": user_ids }))?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn bulk_assign_role(
        &self,
        assignment: &BulkRoleAssignment,
    ) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::post(format!("{USERS}/bulk-role")).json(assignment)?,
        )
        .await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn bulk_set_status(
        &self,
        user_ids: &[i64],
        is_active: bool,
    ) -> Result<Value, GatewayError> {
        fetch_json(
            self.gateway,
            Request::put("/users/bulk/toggle-status")
                .json(&json!({ "userIds": user_ids, "isActive": is_active }))?,
        )
        .await
    }
}
