use std::fmt;

use qbank_sdk::{LeaderboardEntry, Reward, UserRank, normalize_item, normalize_list};
use serde_json::Value;

use super::{fetch_tolerant_json, fetch_tolerant_with};
use crate::client::Gateway;
use crate::error::GatewayError;
use crate::outcome::Outcome;
use crate::request::Request;

/// Which ranking to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Board {
    #[default]
    Questions,
    Employees,
}

impl Board {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Questions => "questions",
            Self::Employees => "employees",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timeframe {
    #[default]
    All,
    Week,
    Month,
}

impl Timeframe {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Rankings and rewards. Every call tolerates 4xx.
pub struct LeaderboardClient<'a> {
    gateway: &'a Gateway,
}

impl<'a> LeaderboardClient<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if an entry is malformed.
    pub async fn get(
        &self,
        board: Board,
        timeframe: Timeframe,
    ) -> Result<Outcome<Vec<LeaderboardEntry>>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get("/leaderboard")
                .query("board", board.as_str())
                .query("timeframe", timeframe.as_str()),
            |response| Ok(normalize_list(response.json()?, "leaderboard")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if the rank is malformed.
    pub async fn user_rank(&self, user_id: i64) -> Result<Outcome<UserRank>, GatewayError> {
        fetch_tolerant_with(
            self.gateway,
            Request::get(format!("/leaderboard/rank/{user_id}")),
            |response| Ok(normalize_item(response.json()?, "rank")?),
        )
        .await
    }

    /// # Errors
    /// 5xx and transport failures, or `Decode` if a reward is malformed.
    pub async fn rewards(&self) -> Result<Outcome<Vec<Reward>>, GatewayError> {
        fetch_tolerant_with(self.gateway, Request::get("/leaderboard/rewards"), |response| {
            Ok(normalize_list(response.json()?, "rewards")?)
        })
        .await
    }

    /// # Errors
    /// 5xx and transport failures.
    pub async fn claim_reward(&self, reward_id: i64) -> Result<Outcome<Value>, GatewayError> {
        fetch_tolerant_json(
            self.gateway,
            Request::post(format!("/leaderboard/rewards/{reward_id}/claim")),
        )
        .await
    }
}
