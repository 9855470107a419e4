//! Per-domain sub-clients.
//!
//! Each sub-client is a borrowing view over the [`Gateway`], so obtaining one
//! is free: `gateway.companies().list(&params)`. Domains whose endpoints let
//! callers branch on 4xx themselves (questions, categories, favorites,
//! leaderboard, payment) return [`Outcome`] instead of rejecting.

mod activity;
mod auth;
mod categories;
mod companies;
mod favorites;
mod feature_toggles;
mod leaderboard;
mod payment;
mod permissions;
mod questions;
mod roles;
mod users;

pub use activity::ActivityLogsClient;
pub use auth::AuthClient;
pub use categories::CategoriesClient;
pub use companies::CompaniesClient;
pub use favorites::FavoritesClient;
pub use feature_toggles::FeatureTogglesClient;
pub use leaderboard::{Board, LeaderboardClient, Timeframe};
pub use payment::PaymentClient;
pub use permissions::PermissionsClient;
pub use questions::QuestionsClient;
pub use roles::RolesClient;
pub use users::UsersClient;

use serde_json::Value;

use crate::client::Gateway;
use crate::error::GatewayError;
use crate::outcome::Outcome;
use crate::request::RequestBuilder;
use crate::response::Response;

impl Gateway {
    #[must_use]
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    #[must_use]
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(self)
    }

    #[must_use]
    pub fn companies(&self) -> CompaniesClient<'_> {
        CompaniesClient::new(self)
    }

    #[must_use]
    pub fn roles(&self) -> RolesClient<'_> {
        RolesClient::new(self)
    }

    #[must_use]
    pub fn permissions(&self) -> PermissionsClient<'_> {
        PermissionsClient::new(self)
    }

    #[must_use]
    pub fn questions(&self) -> QuestionsClient<'_> {
        QuestionsClient::new(self)
    }

    #[must_use]
    pub fn categories(&self) -> CategoriesClient<'_> {
        CategoriesClient::new(self)
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesClient<'_> {
        FavoritesClient::new(self)
    }

    #[must_use]
    pub fn leaderboard(&self) -> LeaderboardClient<'_> {
        LeaderboardClient::new(self)
    }

    #[must_use]
    pub fn payment(&self) -> PaymentClient<'_> {
        PaymentClient::new(self)
    }

    #[must_use]
    pub fn activity_logs(&self) -> ActivityLogsClient<'_> {
        ActivityLogsClient::new(self)
    }

    #[must_use]
    pub fn feature_toggles(&self) -> FeatureTogglesClient<'_> {
        FeatureTogglesClient::new(self)
    }
}

/// Execute under the default policy and decode the body as JSON.
async fn fetch_json(gateway: &Gateway, request: RequestBuilder) -> Result<Value, GatewayError> {
    gateway.execute(request.build()?).await?.json()
}

/// Execute tolerating 4xx; a non-2xx reply becomes [`Outcome::ClientError`].
async fn fetch_tolerant(
    gateway: &Gateway,
    request: RequestBuilder,
) -> Result<Outcome<Response>, GatewayError> {
    let response = gateway
        .execute(request.tolerate_client_errors().build()?)
        .await?;
    if response.status().is_success() {
        Ok(Outcome::Success(response))
    } else {
        Ok(Outcome::ClientError {
            status: response.status(),
            body: response.json_lossy(),
        })
    }
}

/// [`fetch_tolerant`] followed by a fallible decode of the success body.
async fn fetch_tolerant_with<T>(
    gateway: &Gateway,
    request: RequestBuilder,
    decode: impl FnOnce(Response) -> Result<T, GatewayError>,
) -> Result<Outcome<T>, GatewayError> {
    match fetch_tolerant(gateway, request).await? {
        Outcome::Success(response) => decode(response).map(Outcome::Success),
        Outcome::ClientError { status, body } => Ok(Outcome::ClientError { status, body }),
    }
}

/// Tolerant call whose success body is returned as plain JSON.
async fn fetch_tolerant_json(
    gateway: &Gateway,
    request: RequestBuilder,
) -> Result<Outcome<Value>, GatewayError> {
    fetch_tolerant_with(gateway, request, |response| response.json()).await
}
