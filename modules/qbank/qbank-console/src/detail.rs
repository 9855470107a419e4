use parking_lot::Mutex;
use qbank_gateway::Gateway;
use qbank_sdk::User;
use tracing::warn;

use crate::dates::format_date;
use crate::error::ViewError;
use crate::guard::FetchGuard;
use crate::session::{CurrentUser, permissions};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Contact,
    Address,
}

impl DetailTab {
    pub const ALL: [Self; 3] = [Self::Overview, Self::Contact, Self::Address];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Contact => "Contact Information",
            Self::Address => "Address",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Loading,
    Loaded(Box<User>),
    NotFound,
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_owned()
}

/// Label/value rows of one tab; missing values render as `N/A`.
#[must_use]
pub fn tab_rows(company: &User, tab: DetailTab) -> Vec<(&'static str, String)> {
    match tab {
        DetailTab::Overview => vec![
            ("Company Name", or_na(company.company_name.as_deref())),
            ("GST Number", or_na(company.gst_number.as_deref())),
            ("Industry", or_na(company.industry.as_deref())),
            ("Website", or_na(company.website.as_deref())),
            ("Description", or_na(company.company_description.as_deref())),
            (
                "Status",
                if company.is_active { "Active" } else { "Inactive" }.to_owned(),
            ),
            ("Created", or_na(Some(&format_date(company.created_at.as_deref())))),
        ],
        DetailTab::Contact => vec![
            ("Contact Person", or_na(Some(&company.full_name()))),
            ("Email", or_na(company.email.as_deref())),
            ("Mobile", or_na(company.mobile_number.as_deref())),
        ],
        DetailTab::Address => vec![
            ("Address", or_na(company.address.as_deref())),
            ("City", or_na(company.city.as_deref())),
            ("State", or_na(company.state.as_deref())),
            ("Country", or_na(company.country.as_deref())),
            ("Pincode", or_na(company.pincode.as_deref())),
        ],
    }
}

/// Read-only view of one company.
pub struct CompanyDetailView<'g> {
    gateway: &'g Gateway,
    user: CurrentUser,
    id: i64,
    state: Mutex<DetailState>,
    guard: FetchGuard,
}

impl<'g> CompanyDetailView<'g> {
    #[must_use]
    pub fn new(gateway: &'g Gateway, user: CurrentUser, id: i64) -> Self {
        Self {
            gateway,
            user,
            id,
            state: Mutex::new(DetailState::Loading),
            guard: FetchGuard::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> DetailState {
        self.state.lock().clone()
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.user.has_permission(permissions::COMPANY_EDIT)
    }

    /// Fetch the company. A failure leaves the view in its not-found state.
    ///
    /// # Errors
    /// The gateway error behind the failure.
    pub async fn mount(&self) -> Result<(), ViewError> {
        let ticket = self.guard.issue();
        *self.state.lock() = DetailState::Loading;

        let result = self.gateway.companies().get(self.id).await;
        if !self.guard.is_current(ticket) {
            return Ok(());
        }

        match result {
            Ok(company) => {
                *self.state.lock() = DetailState::Loaded(Box::new(company));
                Ok(())
            }
            Err(err) => {
                warn!(company_id = self.id, error = %err, "company details unavailable");
                *self.state.lock() = DetailState::NotFound;
                Err(err.into())
            }
        }
    }

    pub fn unmount(&self) {
        self.guard.unmount();
    }
}
