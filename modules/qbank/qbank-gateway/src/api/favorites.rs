use qbank_sdk::{Favorite, ListParams, Page, normalize_page};
use serde_json::{Value, json};

use super::{fetch_tolerant_json, fetch_tolerant_with};
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::outcome::Outcome;
use crate::request::Request;

/// The signed-in user's favorite questions. Every call tolerates 4xx.
pub struct FavoritesClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> FavoritesClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if a favorite is malformed.
    pub async fn list(&self, params: &ListParams) -> Result<Outcome<Page<Favorite>>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get("/favorites").query_pairs(params.to_query()),
            |response| Ok(normalize_page(response.json()?, "favorites")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn add(&self, question_id: i64) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(
            self.gateway,
            Request::post("/favorites").json(&json!({ "questionId": question_id }))?,
        )
        .await
    }

    /// Remove by favorite id (not question id).
    ///
    /// # Errors
    /// 5xx and transport failures.
    pub async fn remove(&self, favorite_id: i64) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::delete(format!("/favorites/{favorite_id}"))).await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn bulk_remove(&self, favorite_ids: &[i64]) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(
            self.gateway,
            Request::delete("/favorites/bulk-remove").json(&json!({ "favoriteIds": favorite_ids }))?,
        )
        .await
    }
}
