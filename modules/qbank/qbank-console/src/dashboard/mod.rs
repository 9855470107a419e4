//! Role dashboards.
//!
//! Each dashboard issues its requests concurrently and applies the joined
//! result in one step. A failed refresh keeps the previously shown data and
//! records the failure as an inline error.

mod company;
mod reviewer;
mod writer;

pub use company::{CompanyDashboard, CompanyStatsView};
pub use reviewer::{InvalidateDialog, ReviewerDashboard, ReviewerSnapshot, ReviewerStats};
pub use writer::{QuestionWriterDashboard, WriterSnapshot, WriterStats};

use std::future::Future;

use parking_lot::Mutex;
use qbank_gateway::{Gateway, MSG_GENERIC, Notice, Outcome};
use qbank_sdk::backend_message;
use tracing::debug;

use crate::error::ViewError;
use crate::guard::FetchGuard;

/// What a dashboard renders: the last good data plus fetch flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
}

impl<T> Default for DashboardState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            refreshing: false,
            error: None,
        }
    }
}

/// State cell shared by the dashboards.
pub(crate) struct Panel<T> {
    state: Mutex<DashboardState<T>>,
    guard: FetchGuard,
}

impl<T: Clone> Panel<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(DashboardState::default()),
            guard: FetchGuard::new(),
        }
    }

    pub(crate) fn snapshot(&self) -> DashboardState<T> {
        self.state.lock().clone()
    }

    pub(crate) fn unmount(&self) {
        self.guard.unmount();
    }

    /// Run `fetch` and apply its result unless a newer load superseded it.
    pub(crate) async fn load(
        &self,
        name: &'static str,
        fetch: impl Future<Output = Result<T, ViewError>>,
    ) -> Result<(), ViewError> {
        let ticket = self.guard.issue();
        {
            let mut state = self.state.lock();
            if state.data.is_some() {
                state.refreshing = true;
            } else {
                state.loading = true;
            }
        }

        let result = fetch.await;

        if !self.guard.is_current(ticket) {
            debug!(dashboard = name, "discarding superseded dashboard data");
            return Ok(());
        }
        let mut state = self.state.lock();
        state.loading = false;
        state.refreshing = false;
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
                Ok(())
            }
            Err(err) => {
                debug!(dashboard = name, error = %err, "dashboard refresh failed");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// Unwrap a tolerant result. A client error has not been announced by the
/// gateway, so it is announced here.
pub(crate) fn settle<T>(gateway: &Gateway, outcome: Outcome<T>) -> Result<T, ViewError> {
    match outcome {
        Outcome::Success(value) => Ok(value),
        Outcome::ClientError { status, body } => {
            let message = backend_message(&body).unwrap_or(MSG_GENERIC).to_owned();
            gateway.notify(Notice::error(message.clone()));
            Err(ViewError::Rejected { status, message })
        }
    }
}
