use parking_lot::Mutex;
use qbank_gateway::{Gateway, Notice};
use qbank_sdk::{
    InvalidateQuestionRequest, ListParams, Question, QuestionStatus, Severity, SortOrder, VoteKind,
};
use tracing::info;

use super::{DashboardState, Panel, settle};
use crate::error::ViewError;
use crate::forms::FormErrors;
use crate::session::CurrentUser;

const RECENT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewerStats {
    pub total_questions: u64,
    pub pending_review: usize,
    pub invalidated: usize,
    pub reviewed_by_me: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewerSnapshot {
    pub stats: ReviewerStats,
    pub questions: Vec<Question>,
}

impl ReviewerSnapshot {
    fn build(reviewer_id: i64, questions: Vec<Question>, total_questions: u64) -> Self {
        let with_status =
            |status: QuestionStatus| questions.iter().filter(|q| q.status == status).count();
        let stats = ReviewerStats {
            total_questions,
            pending_review: with_status(QuestionStatus::PendingReview),
            invalidated: with_status(QuestionStatus::Invalidated),
            reviewed_by_me: questions
                .iter()
                .filter(|q| q.reviewed_by == Some(reviewer_id))
                .count(),
        };
        Self { stats, questions }
    }
}

/// The "report question issue" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidateDialog {
    pub question_id: i64,
    pub reason: String,
    pub severity: Severity,
}

impl InvalidateDialog {
    fn open(question_id: i64) -> Self {
        Self {
            question_id,
            reason: String::new(),
            severity: Severity::default(),
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.reason.trim().is_empty()
    }
}

/// Landing page of a reviewer.
pub struct ReviewerDashboard<'g> {
    gateway: &'g Gateway,
    user: CurrentUser,
    panel: Panel<ReviewerSnapshot>,
    dialog: Mutex<Option<InvalidateDialog>>,
}

impl<'g> ReviewerDashboard<'g> {
    #[must_use]
    pub fn new(gateway: &'g Gateway, user: CurrentUser) -> Self {
        Self {
            gateway,
            user,
            panel: Panel::new(),
            dialog: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn state(&self) -> DashboardState<ReviewerSnapshot> {
        self.panel.snapshot()
    }

    /// # Errors
    /// The failing request; earlier data stays shown.
    pub async fn mount(&self) -> Result<(), ViewError> {
        self.refresh().await
    }

    /// # Errors
    /// See [`Self::mount`].
    pub async fn refresh(&self) -> Result<(), ViewError> {
        let gateway = self.gateway;
        let reviewer_id = self.user.user_id;
        let params = ListParams::new()
            .page(1)
            .limit(RECENT_LIMIT)
            .sort("created_at", SortOrder::Desc)
            .include_stats();

        let questions = gateway.questions();
        self.panel
            .load("reviewer", async {
                let page = settle(gateway, questions.list(&params).await?)?;
                Ok::<_, ViewError>(ReviewerSnapshot::build(reviewer_id, page.items, page.total))
            })
            .await
    }

    /// # Errors
    /// A rejected vote, or the failure of the reload.
    pub async fn vote(&self, question_id: i64, vote: VoteKind) -> Result<(), ViewError> {
        settle(self.gateway, self.gateway.questions().vote(question_id, vote).await?)?;
        self.refresh().await
    }

    #[must_use]
    pub fn dialog(&self) -> Option<InvalidateDialog> {
        self.dialog.lock().clone()
    }

    /// Open the dialog for a question with an empty reason and low severity.
    pub fn open_invalidate(&self, question_id: i64) {
        *self.dialog.lock() = Some(InvalidateDialog::open(question_id));
    }

    pub fn set_reason(&self, reason: &str) {
        if let Some(dialog) = self.dialog.lock().as_mut() {
            reason.clone_into(&mut dialog.reason);
        }
    }

    pub fn set_severity(&self, severity: Severity) {
        if let Some(dialog) = self.dialog.lock().as_mut() {
            dialog.severity = severity;
        }
    }

    pub fn close_invalidate(&self) {
        *self.dialog.lock() = None;
    }

    /// Invalidate the dialog's question, close the dialog and reload.
    ///
    /// Returns `false` when no dialog is open.
    ///
    /// # Errors
    /// `Invalid` with a blank reason; a rejected invalidation keeps the
    /// dialog open.
    pub async fn submit_invalidation(&self) -> Result<bool, ViewError> {
        let Some(dialog) = self.dialog() else {
            return Ok(false);
        };
        if !dialog.can_submit() {
            let mut errors = FormErrors::new();
            errors.add("reason", "Reason is required");
            return Err(ViewError::Invalid(errors));
        }

        let request = InvalidateQuestionRequest {
            reason: dialog.reason.trim().to_owned(),
            severity: dialog.severity,
            reviewed_by: self.user.user_id,
        };
        let outcome = self
            .gateway
            .questions()
            .invalidate(dialog.question_id, &request)
            .await?;
        settle(self.gateway, outcome)?;
        info!(
            question_id = dialog.question_id,
            severity = dialog.severity.description(),
            "question invalidated"
        );
        self.gateway.notify(Notice::success("Question reported successfully"));
        self.close_invalidate();
        self.refresh().await?;
        Ok(true)
    }

    pub fn unmount(&self) {
        self.panel.unmount();
    }
}
