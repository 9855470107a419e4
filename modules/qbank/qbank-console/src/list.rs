//! The company list: filters restored from and mirrored to the URL query,
//! pagination, status toggling and deletion.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use qbank_gateway::{Gateway, Notice};
use qbank_sdk::{ListParams, SortOrder, User};
use tracing::{debug, info, warn};

use crate::error::ViewError;
use crate::guard::FetchGuard;
use crate::prompt::Confirm;
use crate::query::{ListQuery, STATUS_ALL};
use crate::session::{CurrentUser, permissions};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const STATUS_OPTIONS: [&str; 4] = [STATUS_ALL, "active", "inactive", "pending"];

const COMPANY_ROLE: &str = "company";
const DELETE_PROMPT: &str =
    "Are you sure you want to delete this company? This action cannot be undone.";

/// Snapshot of what the list renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub items: Vec<User>,
    /// First fetch in flight; the table shows a spinner.
    pub loading: bool,
    /// A later fetch in flight; the current rows stay visible.
    pub refreshing: bool,
    /// 0-based.
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub search: String,
    pub status: String,
    pub error: Option<String>,
    /// Filters as last written to the URL, `?search=..&status=..`.
    pub url_query: String,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            refreshing: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            search: String::new(),
            status: STATUS_ALL.to_owned(),
            error: None,
            url_query: String::new(),
        }
    }
}

impl ListState {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size.max(1)))
    }

    fn query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            status: self.status.clone(),
            page: self.page,
        }
    }

    /// Request parameters of the current filters; `page` goes out 1-based.
    #[must_use]
    pub fn params(&self) -> ListParams {
        let mut params = ListParams::new()
            .role(COMPANY_ROLE)
            .page(self.page.saturating_add(1))
            .limit(self.page_size)
            .search(&self.search)
            .sort("created_at", SortOrder::Desc);
        if self.status != STATUS_ALL {
            params = params.status(self.status.clone());
        }
        params
    }
}

/// View-model of the company list screen.
pub struct CompanyListView<'g> {
    gateway: &'g Gateway,
    user: CurrentUser,
    confirm: Arc<dyn Confirm>,
    state: Mutex<ListState>,
    guard: FetchGuard,
    loaded_once: AtomicBool,
}

impl<'g> CompanyListView<'g> {
    #[must_use]
    pub fn new(gateway: &'g Gateway, user: CurrentUser, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            gateway,
            user,
            confirm,
            state: Mutex::new(ListState::default()),
            guard: FetchGuard::new(),
            loaded_once: AtomicBool::new(false),
        }
    }

    /// Start with a page size other than [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn with_page_size(self, page_size: u32) -> Self {
        self.state.lock().page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn state(&self) -> ListState {
        self.state.lock().clone()
    }

    #[must_use]
    pub fn can_view(&self) -> bool {
        self.user.has_permission(permissions::COMPANY_VIEW)
    }

    #[must_use]
    pub fn can_create(&self) -> bool {
        self.user.has_permission(permissions::COMPANY_CREATE)
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.user.has_permission(permissions::COMPANY_EDIT)
    }

    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.user.has_permission(permissions::COMPANY_DELETE)
    }

    /// Restore the filters from a URL query string and fetch.
    ///
    /// # Errors
    /// `AccessDenied` without `company_view`; otherwise the fetch failure,
    /// which is also kept as the inline error.
    pub async fn mount(&self, query: &str) -> Result<(), ViewError> {
        let query = ListQuery::parse(query);
        {
            let mut state = self.state.lock();
            state.search = query.search;
            state.status = query.status;
            state.page = query.page;
        }
        self.fetch().await
    }

    /// # Errors
    /// See [`Self::mount`].
    pub async fn search(&self, text: &str) -> Result<(), ViewError> {
        {
            let mut state = self.state.lock();
            text.trim().clone_into(&mut state.search);
            state.page = 0;
        }
        self.fetch().await
    }

    /// # Errors
    /// See [`Self::mount`].
    pub async fn filter_status(&self, status: &str) -> Result<(), ViewError> {
        {
            let mut state = self.state.lock();
            status.clone_into(&mut state.status);
            state.page = 0;
        }
        self.fetch().await
    }

    /// # Errors
    /// See [`Self::mount`].
    pub async fn go_to_page(&self, page: u32) -> Result<(), ViewError> {
        self.state.lock().page = page;
        self.fetch().await
    }

    /// # Errors
    /// See [`Self::mount`].
    pub async fn set_page_size(&self, page_size: u32) -> Result<(), ViewError> {
        {
            let mut state = self.state.lock();
            state.page_size = page_size.max(1);
            state.page = 0;
        }
        self.fetch().await
    }

    /// Fetch again with the current filters.
    ///
    /// # Errors
    /// See [`Self::mount`].
    pub async fn refresh(&self) -> Result<(), ViewError> {
        self.fetch().await
    }

    /// Flip a company's active flag. The row changes only once the backend
    /// has accepted the new value.
    ///
    /// # Errors
    /// `NotFound` when the row is not on the current page; the gateway error
    /// when the update fails, in which case the row is left untouched.
    pub async fn toggle_status(&self, id: i64) -> Result<(), ViewError> {
        let current = self
            .state
            .lock()
            .items
            .iter()
            .find(|company| company.id == id)
            .map(|company| company.is_active)
            .ok_or_else(|| ViewError::NotFound(format!("company {id}")))?;
        let is_active = !current;

        self.gateway.users().set_status(id, is_active).await?;

        if let Some(company) = self.state.lock().items.iter_mut().find(|c| c.id == id) {
            company.is_active = is_active;
        }
        let verb = if is_active { "activated" } else { "deactivated" };
        info!(company_id = id, is_active, "company status changed");
        self.gateway.notify(Notice::success(format!("Company {verb} successfully")));
        Ok(())
    }

    /// Delete a company after confirmation, then reload the page.
    ///
    /// Returns `false` when the user declined. A failed reload does not undo
    /// the delete; it is kept as the inline error.
    ///
    /// # Errors
    /// The gateway error of the delete.
    pub async fn delete(&self, id: i64) -> Result<bool, ViewError> {
        if !self.confirm.confirm(DELETE_PROMPT).await {
            debug!(company_id = id, "company delete declined");
            return Ok(false);
        }
        self.gateway.users().delete(id).await?;
        info!(company_id = id, "company deleted");
        self.gateway.notify(Notice::success("Company deleted successfully"));
        if let Err(err) = self.fetch().await {
            warn!(company_id = id, error = %err, "reload after delete failed");
        }
        Ok(true)
    }

    /// Stop applying results; fetches still in flight are discarded.
    pub fn unmount(&self) {
        self.guard.unmount();
    }

    async fn fetch(&self) -> Result<(), ViewError> {
        if !self.can_view() {
            return Err(ViewError::AccessDenied(permissions::COMPANY_VIEW));
        }

        let ticket = self.guard.issue();
        let first = !self.loaded_once.swap(true, Ordering::SeqCst);
        let (params, query) = {
            let mut state = self.state.lock();
            if first {
                state.loading = true;
            } else {
                state.refreshing = true;
            }
            (state.params(), state.query())
        };

        let result = self.gateway.companies().list(&params).await;

        if !self.guard.is_current(ticket) {
            debug!("discarding superseded company list response");
            return Ok(());
        }

        let mut state = self.state.lock();
        state.loading = false;
        state.refreshing = false;
        match result {
            Ok(page) => {
                state.items = page.items;
                state.total = page.total;
                state.error = None;
                state.url_query = query.to_query_string();
                Ok(())
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_of_default_filters() {
        let params = ListState::default().params().to_query();
        let keys: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"role"));
        assert!(!keys.contains(&"status"));
        assert!(!keys.contains(&"search"));
        assert!(params.contains(&("page".to_owned(), "1".to_owned())));
        assert!(params.contains(&("limit".to_owned(), "10".to_owned())));
    }

    #[test]
    fn params_carry_active_filters() {
        let state = ListState {
            page: 2,
            page_size: 25,
            search: "  acme ".into(),
            status: "inactive".into(),
            ..ListState::default()
        };
        let params = state.params();
        assert_eq!(params.page, Some(3));
        assert_eq!(params.limit, Some(25));
        assert_eq!(params.search.as_deref(), Some("acme"));
        assert_eq!(params.status.as_deref(), Some("inactive"));
        assert_eq!(params.sort_by.as_deref(), Some("created_at"));
    }

    #[test]
    fn last_page_number_does_not_overflow() {
        let state = ListState {
            page: u32::MAX,
            ..ListState::default()
        };
        assert_eq!(state.params().page, Some(u32::MAX));
    }

    #[test]
    fn total_pages_rounds_up() {
        let state = ListState {
            total: 21,
            ..ListState::default()
        };
        assert_eq!(state.total_pages(), 3);
        assert_eq!(ListState::default().total_pages(), 0);
    }
}
