use qbank_sdk::{
    InvalidateQuestionRequest, ListParams, Page, Question, VoteKind, VoteRequest, normalize_item,
    normalize_page,
};
use serde::Serialize;
use serde_json::{Value, json};

use super::{fetch_tolerant_json, fetch_tolerant_with};
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::outcome::Outcome;
use crate::request::Request;
use crate::transfer::{Download, Upload};

/// The question bank. Every call tolerates 4xx.
pub struct QuestionsClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> QuestionsClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if a question is malformed.
    pub async fn list(&self, params: &ListParams) -> Result<Outcome<Page<Question>>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get("/questions").query_pairs(params.to_query()),
            |response| Ok(normalize_page(response.json()?, "questions")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if the question is malformed.
    pub async fn get(&self, id: i64) -> Result<Outcome<Question>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get(format!("/questions/{id}")),
            |response| Ok(normalize_item(response.json()?, "question")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn create<B: Serialize + ?Sized>(&self, question: &B) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::post("/questions").json(question)?).await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: i64,
        question: &B,
    ) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::put(format!("/questions/{id}")).json(question)?).await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn delete(&self, id: i64) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::delete(format!("/questions/{id}"))).await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn bulk_delete(&self, ids: &[i64]) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(
            self.gateway,
            Request::post("/questions/bulk-delete").json(&json!({ "ids": ids }))?,
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn vote(&self, id: i64, vote: VoteKind) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(
            self.gateway,
            Request::post(format!("/questions/{id}/vote")).json(&VoteRequest { vote })?,
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn invalidate(
        &self,
        id: i64,
        invalidation: &InvalidateQuestionRequest,
    ) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(
            self.gateway,
            Request::post(format!("/questions/{id}/invalidate")).json(invalidation)?,
        )
        .await
    }

    /// Import questions from a CSV file.
    ///
    /// # Errors
    /// 5xx and transport failures.
    pub async fn import(&self, file: Upload) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(self.gateway, Request::post("/questions/import").upload(file)).await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn export(&self, params: &ListParams) -> Result<Outcome<Download>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get("/questions/export").query_pairs(params.to_query()),
            |response| Ok(response.download("questions-export.csv")),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn download_template(&self) -> Result<Outcome<Download>, GatewayError> {
        fetch_tolerant_with(self.gateway, Request::get("/questions/template"), |response| {
            Ok(response.download("question-template.csv"))
        })
        .await
    }
}
