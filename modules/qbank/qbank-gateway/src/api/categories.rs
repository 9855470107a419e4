use qbank_sdk::{Category, CategoryRequest, normalize_list};
use serde_json::Value;

use super::{fetch_tolerant_json, fetch_tolerant_with};
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::outcome::Outcome;
use crate::request::Request;

/// Question categories. Every call tolerates 4xx.
pub struct CategoriesClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> CategoriesClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if a category is malformed.
    pub async fn list(&self) -> Result<Outcome<Vec<Category>>, GatewayError> {
        fetch_tolerant_with(self.gateway, Request::get("/categories"), |response| {
            Ok(normalize_list(response.json()?, "categories")?)
        })
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn create(&self, category: &CategoryRequest) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::post("/categories").json(category)?).await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn update(
        &self,
        id: i64,
        category: &CategoryRequest,
    ) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::put(format!("/categories/{id}")).json(category)?).await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn delete(&self, id: i64) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::delete(format!("/categories/{id}"))).await
    }
}
