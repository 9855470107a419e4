use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Favorite {
    pub id: i64,
    #[serde(alias = "questionId")]
    pub question_id: i64,
    pub question_text: Option<String>,
    pub created_at: Option<String>,
}

/// One row of a leaderboard. Question boards fill `question_text`, employee
/// boards fill `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub rank: Option<u32>,
    pub name: Option<String>,
    pub question_text: Option<String>,
    pub score: i64,
    pub upvotes: i64,
    pub downvotes: i64,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.question_text.as_deref())
            .unwrap_or("-")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRank {
    pub user_id: i64,
    pub rank: Option<u32>,
    pub score: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub points_required: i64,
    pub claimed: bool,
}
