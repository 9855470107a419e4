use qbank_sdk::{ListParams, Page, QrCode, Transaction, normalize_item, normalize_list, normalize_page};
use serde_json::Value;

use super::{fetch_tolerant_json, fetch_tolerant_with};
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::outcome::Outcome;
use crate::request::Request;
use crate::transfer::Upload;

/// Payment QR codes and transactions. Every call tolerates 4xx.
pub struct PaymentClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> PaymentClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if a QR code is malformed.
    pub async fn qr_codes(&self) -> Result<Outcome<Vec<QrCode>>, GatewayError> {
        fetch_tolerant_with(self.gateway, Request::get("/payment/qr-codes"), |response| {
            Ok(normalize_list(response.json()?, "qrCodes")?)
        })
        .await
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if the QR code is malformed.
    pub async fn qr_code(&self, id: i64) -> Result<Outcome<QrCode>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get(format!("/payment/qr-codes/{id}")),
            |response| Ok(normalize_item(response.json()?, "qrCode")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn delete_qr_code(&self, id: i64) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::delete(format!("/payment/qr-codes/{id}"))).await
    }

    /// Make this QR code the one shown to payers.
    ///
    /// # Errors
    /// 5xx and transport failures.
    pub async fn activate_qr_code(&self, id: i64) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(
            self.gateway,
            Request::post(format!("/payment/qr-codes/{id}/activate")),
        )
        .await
    }

    /// Upload a QR code image.
    ///
    /// # Errors
    /// 5xx and transport failures.
    pub async fn upload_qr_code(&self, image: Upload) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::post("/payment/qr-codes").upload(image)).await
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if a transaction is malformed.
    pub async fn transactions(
        &self,
        params: &ListParams,
    ) -> Result<Outcome<Page<Transaction>>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get("/payment/transactions").query_pairs(params.to_query()),
            |response| Ok(normalize_page(response.json()?, "transactions")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if the transaction is malformed.
    pub async fn transaction(&self, id: i64) -> Result<Outcome<Transaction>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get(format!("/payment/transactions/{id}")),
            |response| Ok(normalize_item(response.json()?, "transaction")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn status(&self) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::get("/payment/status")).await
    }
}
