use qbank_sdk::{CompanyPayload, CompanyStats, ListParams, Page, User, normalize_item, normalize_page};
use serde::Serialize;
use serde_json::Value;

use super::fetch_json;
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::Request;

const COMPANY_ROLE: &str = "company";

/// Companies: users carrying the `company` role.
pub struct CompaniesClient<'a> {
    gateway: &'a Gateway,
}

#[derive(Serialize)]
struct CreateCompany<'p> {
    #[serde(flatten)]
    payload: &'p CompanyPayload,
    role: &'static str,
}

impl<'a> CompaniesClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// List companies. `role=company` and `includeDetails=true` are always sent,
    /// overriding any role in `params`.
    ///
    /// # Errors
    /// Classified gateway errors, or `Decode` if a record is malformed.
    pub async fn list(&self, params: &ListParams) -> Result<Page<User>, GatewayError> {
        let params = params
            .clone()
            .role(COMPANY_ROLE)
            .extra("includeDetails", "true");
        let body = fetch_json(self.gateway, Request::get("/users").query_pairs(params.to_query())).await?;
        Ok(normalize_page(body, "users")?)
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if the record is malformed.
    pub async fn get(&self, id: i64) -> Result<User, GatewayError> {
        let body = fetch_json(
            self.gateway,
            Request::get(format!("/users/{id}")).query("includeDetails", "true"),
        )
        .await?;
        Ok(normalize_item(body, "user")?)
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn create(&self, payload: &CompanyPayload) -> Result<Value, GatewayError> {
        let body = CreateCompany {
            payload,
            role: COMPANY_ROLE,
        };
        fetch_json(self.gateway, Request::post("/users").json(&body)?).await
    }

    /// # Errors
    /// Classified gateway errors.
    pub async fn update(&self, id: i64, payload: &CompanyPayload) -> Result<Value, GatewayError> {
        fetch_json(self.gateway, Request::put(format!("/users/{id}")).json(payload)?).await
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if a record is malformed.
    pub async fn employees(
        &self,
        company_id: i64,
        params: &ListParams,
    ) -> Result<Page<User>, GatewayError> {
        let body = fetch_json(
            self.gateway,
            Request::get(format!("/users/company/{company_id}/employees"))
                .query_pairs(params.to_query()),
        )
        .await?;
        Ok(normalize_page(body, "employees")?)
    }

    /// # Errors
    /// Classified gateway errors, or `Decode` if the stats are malformed.
    pub async fn stats(&self, company_id: i64) -> Result<CompanyStats, GatewayError> {
        let body = fetch_json(
            self.gateway,
            Request::get(format!("/users/company/{company_id}/stats")),
        )
        .await?;
        Ok(normalize_item(body, "stats")?)
    }
}
