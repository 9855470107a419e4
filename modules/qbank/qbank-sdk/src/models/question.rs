use std::fmt;

use serde::{Deserialize, Serialize};

/// Review lifecycle of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    #[default]
    Draft,
    PendingReview,
    Approved,
    Invalidated,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Other,
}

impl QuestionStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingReview => "Pending Review",
            Self::Approved => "Approved",
            Self::Invalidated => "Invalidated",
            Self::Other => "Unknown",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How serious a reviewer considers an invalidated question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Low => "Low - Minor issue",
            Self::Medium => "Medium - Needs attention",
            Self::High => "High - Critical issue",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    pub id: i64,
    #[serde(alias = "question_text")]
    pub text: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub status: QuestionStatus,
    #[serde(alias = "up_votes")]
    pub upvotes: i64,
    #[serde(alias = "down_votes")]
    pub downvotes: i64,
    pub invalidation_reason: Option<String>,
    pub invalidation_severity: Option<Severity>,
    pub user_id: Option<i64>,
    pub author_name: Option<String>,
    pub reviewed_by: Option<i64>,
    pub created_at: Option<String>,
}

impl Question {
    #[must_use]
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub question_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_is_preserved_as_other() {
        let q: Question = serde_json::from_value(json!({"id": 1, "status": "archived"})).unwrap();
        assert_eq!(q.status, QuestionStatus::Other);
    }

    #[test]
    fn decodes_backend_aliases() {
        let q: Question = serde_json::from_value(json!({
            "id": 9,
            "question_text": "What is ownership?",
            "status": "pending_review",
            "up_votes": 4,
            "down_votes": 1,
            "invalidation_severity": "high"
        }))
        .unwrap();

        assert_eq!(q.text, "What is ownership?");
        assert_eq!(q.status, QuestionStatus::PendingReview);
        assert_eq!(q.score(), 3);
        assert_eq!(q.invalidation_severity, Some(Severity::High));
    }
}
