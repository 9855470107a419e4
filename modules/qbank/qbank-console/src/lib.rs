//! Question Bank console view-models.
//!
//! Every screen of the admin console is a view-model over a borrowed
//! [`qbank_gateway::Gateway`]: it owns the screen state, exposes the user
//! operations as async methods and leaves rendering to the front-end. Views
//! take `&self`; state lives behind short-lived locks that are never held
//! across a request.
//!
//! ```no_run
//! # async fn run(gateway: qbank_gateway::Gateway) -> Result<(), qbank_console::ViewError> {
//! use std::sync::Arc;
//! use qbank_console::{CompanyListView, CurrentUser, FixedAnswer, permissions};
//!
//! let user = CurrentUser::new(1, 0, [permissions::COMPANY_VIEW]);
//! let list = CompanyListView::new(&gateway, user, Arc::new(FixedAnswer(false)));
//! list.mount("?status=active").await?;
//! for company in list.state().items {
//!     println!("{}", company.display_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod dashboard;
pub mod dates;
pub mod forms;

mod detail;
mod error;
mod guard;
mod list;
mod prompt;
mod query;
mod session;

pub use detail::{CompanyDetailView, DetailState, DetailTab, tab_rows};
pub use error::ViewError;
pub use forms::{FormErrors, FormMode};
pub use guard::{FetchGuard, Ticket};
pub use list::{CompanyListView, DEFAULT_PAGE_SIZE, ListState, STATUS_OPTIONS};
pub use prompt::{Confirm, FixedAnswer};
pub use query::{ListQuery, STATUS_ALL};
pub use session::{CurrentUser, permissions};
