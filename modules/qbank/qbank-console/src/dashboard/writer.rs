use qbank_gateway::Gateway;
use qbank_gateway::api::{Board, Timeframe};
use qbank_sdk::{LeaderboardEntry, ListParams, Question, QuestionStatus, SortOrder, VoteKind};
use tracing::info;

use super::{DashboardState, Panel, settle};
use crate::error::ViewError;
use crate::session::CurrentUser;

const RECENT_LIMIT: u32 = 5;
const LEADERBOARD_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub total_questions: u64,
    pub my_questions: u64,
    /// Mine, among the recent questions, still waiting for review.
    pub pending_review: usize,
    /// Invalidated among the recent questions.
    pub invalidated: usize,
    pub my_score: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriterSnapshot {
    pub stats: WriterStats,
    pub recent: Vec<Question>,
    pub top_questions: Vec<LeaderboardEntry>,
    pub top_employees: Vec<LeaderboardEntry>,
}

impl WriterSnapshot {
    fn build(
        user: &CurrentUser,
        recent: (Vec<Question>, u64),
        my_questions: u64,
        mut top_questions: Vec<LeaderboardEntry>,
        mut top_employees: Vec<LeaderboardEntry>,
    ) -> Self {
        let (recent, total_questions) = recent;
        let count = |status: QuestionStatus, mine: bool| {
            recent
                .iter()
                .filter(|q| q.status == status && (!mine || q.user_id == Some(user.user_id)))
                .count()
        };
        let stats = WriterStats {
            total_questions,
            my_questions,
            pending_review: count(QuestionStatus::PendingReview, true),
            invalidated: count(QuestionStatus::Invalidated, false),
            my_score: user.score,
        };
        top_questions.truncate(LEADERBOARD_LIMIT);
        top_employees.truncate(LEADERBOARD_LIMIT);
        Self {
            stats,
            recent,
            top_questions,
            top_employees,
        }
    }
}

/// Landing page of a question writer.
pub struct QuestionWriterDashboard<'g> {
    gateway: &'g Gateway,
    user: CurrentUser,
    panel: Panel<WriterSnapshot>,
}

impl<'g> QuestionWriterDashboard<'g> {
    #[must_use]
    pub fn new(gateway: &'g Gateway, user: CurrentUser) -> Self {
        Self {
            gateway,
            user,
            panel: Panel::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> DashboardState<WriterSnapshot> {
        self.panel.snapshot()
    }

    /// # Errors
    /// The first failing request; earlier data stays shown.
    pub async fn mount(&self) -> Result<(), ViewError> {
        self.refresh().await
    }

    /// # Errors
    /// See [`Self::mount`].
    pub async fn refresh(&self) -> Result<(), ViewError> {
        let gateway = self.gateway;
        let recent_params = ListParams::new()
            .page(1)
            .limit(RECENT_LIMIT)
            .sort("created_at", SortOrder::Desc);
        let mine_params = ListParams::new().user_id(self.user.user_id);

        let questions = gateway.questions();
        let leaderboard = gateway.leaderboard();
        let recent = async {
            let page = settle(gateway, questions.list(&recent_params).await?)?;
            Ok::<_, ViewError>((page.items, page.total))
        };
        let mine = async {
            let page = settle(gateway, questions.list(&mine_params).await?)?;
            Ok::<_, ViewError>(page.total)
        };
        let top_questions = async {
            settle(gateway, leaderboard.get(Board::Questions, Timeframe::All).await?)
        };
        let top_employees = async {
            settle(gateway, leaderboard.get(Board::Employees, Timeframe::All).await?)
        };

        self.panel
            .load("writer", async {
                let (recent, mine, top_questions, top_employees) =
                    futures::try_join!(recent, mine, top_questions, top_employees)?;
                Ok::<_, ViewError>(WriterSnapshot::build(
                    &self.user,
                    recent,
                    mine,
                    top_questions,
                    top_employees,
                ))
            })
            .await
    }

    /// Vote on a question, then reload the dashboard.
    ///
    /// # Errors
    /// A rejected vote, or the failure of the reload.
    pub async fn vote(&self, question_id: i64, vote: VoteKind) -> Result<(), ViewError> {
        settle(self.gateway, self.gateway.questions().vote(question_id, vote).await?)?;
        info!(question_id, up = matches!(vote, VoteKind::Up), "vote recorded");
        self.refresh().await
    }

    pub fn unmount(&self) {
        self.panel.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, status: QuestionStatus, user_id: i64) -> Question {
        Question {
            id,
            status,
            user_id: Some(user_id),
            ..Question::default()
        }
    }

    #[test]
    fn stats_from_recent_questions() {
        let user = CurrentUser::new(7, 120, Vec::<String>::new());
        let recent = vec![
            question(1, QuestionStatus::PendingReview, 7),
            question(2, QuestionStatus::PendingReview, 8),
            question(3, QuestionStatus::Invalidated, 8),
            question(4, QuestionStatus::Invalidated, 7),
            question(5, QuestionStatus::Approved, 7),
        ];
        let board: Vec<LeaderboardEntry> = (1..=8)
            .map(|id| LeaderboardEntry {
                id,
                ..LeaderboardEntry::default()
            })
            .collect();

        let snapshot = WriterSnapshot::build(&user, (recent, 40), 12, board.clone(), board);

        assert_eq!(
            snapshot.stats,
            WriterStats {
                total_questions: 40,
                my_questions: 12,
                pending_review: 1,
                invalidated: 2,
                my_score: 120,
            }
        );
        assert_eq!(snapshot.top_questions.len(), 5);
        assert_eq!(snapshot.top_employees.len(), 5);
        assert_eq!(snapshot.recent.len(), 5);
    }
}
