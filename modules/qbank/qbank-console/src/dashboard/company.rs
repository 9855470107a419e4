use qbank_gateway::Gateway;
use qbank_sdk::ListParams;

use super::{DashboardState, Panel, settle};
use crate::error::ViewError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompanyStatsView {
    pub total_employees: u64,
    pub total_questions: u64,
}

/// Landing page of a company account.
pub struct CompanyDashboard<'g> {
    gateway: &'g Gateway,
    company_id: i64,
    panel: Panel<CompanyStatsView>,
}

impl<'g> CompanyDashboard<'g> {
    #[must_use]
    pub fn new(gateway: &'g Gateway, company_id: i64) -> Self {
        Self {
            gateway,
            company_id,
            panel: Panel::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> DashboardState<CompanyStatsView> {
        self.panel.snapshot()
    }

    /// # Errors
    /// The first failure of either count; the previous counts stay shown.
    pub async fn mount(&self) -> Result<(), ViewError> {
        self.refresh().await
    }

    /// Fetch the employee and question totals concurrently.
    ///
    /// # Errors
    /// See [`Self::mount`].
    pub async fn refresh(&self) -> Result<(), ViewError> {
        let gateway = self.gateway;
        let company_id = self.company_id;
        // no limit: a bare-array reply is counted by its length
        let first_page = ListParams::new().page(1);
        let question_params = first_page.clone().extra("companyId", company_id.to_string());

        let companies = gateway.companies();
        let questions = gateway.questions();
        let employees = async {
            let page = companies.employees(company_id, &first_page).await?;
            Ok::<_, ViewError>(page.total)
        };
        let question_total = async {
            let page = settle(gateway, questions.list(&question_params).await?)?;
            Ok::<_, ViewError>(page.total)
        };

        self.panel
            .load("company", async {
                let (total_employees, total_questions) =
                    futures::try_join!(employees, question_total)?;
                Ok::<_, ViewError>(CompanyStatsView {
                    total_employees,
                    total_questions,
                })
            })
            .await
    }

    pub fn unmount(&self) {
        self.panel.unmount();
    }
}
