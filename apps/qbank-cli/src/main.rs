//! qbank - Question Bank admin console for the terminal
//!
//! Drives the console view-models against a live backend and prints what a
//! graphical front-end would render.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use qbank_console::dashboard::{CompanyDashboard, QuestionWriterDashboard, ReviewerDashboard};
use qbank_console::forms::{CompanyForm, CompanyFormValues};
use qbank_console::{
    CompanyDetailView, CompanyListView, CurrentUser, DetailState, FormMode, ListQuery, STATUS_ALL,
    ViewError,
};
use qbank_gateway::{FileCredentialStore, Gateway, Hooks, MSG_GENERIC, Outcome, Session};
use qbank_sdk::{LoginRequest, Severity};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod terminal;

use config::CliConfig;
use terminal::{LoginHint, StdinConfirm, TerminalNotifier};

/// qbank - Question Bank admin console
#[derive(Parser, Debug)]
#[command(name = "qbank")]
#[command(version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and keep the token for later runs
    Login {
        #[arg(long)]
        email: String,

        /// Prompted for when omitted
        #[arg(long, env = "QBANK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Company administration
    #[command(subcommand)]
    Companies(CompanyCommands),

    /// Role landing pages
    #[command(subcommand)]
    Dashboard(DashboardCommands),

    /// Download a bulk-upload CSV template
    Template {
        #[arg(value_enum)]
        kind: TemplateKind,

        /// Directory the file is saved into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum CompanyCommands {
    /// List companies
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one company
    Show { id: i64 },

    /// Register a company account
    Create(CompanyArgs),

    /// Activate or deactivate a company listed on the selected page
    Toggle {
        id: i64,

        #[command(flatten)]
        filters: ListArgs,
    },

    /// Delete a company
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone, Default)]
struct ListArgs {
    #[arg(short, long)]
    search: Option<String>,

    /// all, active, inactive or pending
    #[arg(long, default_value = STATUS_ALL)]
    status: String,

    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    page_size: Option<u32>,
}

impl ListArgs {
    fn url_query(&self) -> String {
        ListQuery {
            search: self.search.clone().unwrap_or_default(),
            status: self.status.clone(),
            page: self.page.saturating_sub(1),
        }
        .to_query_string()
    }
}

#[derive(Args, Debug)]
struct CompanyArgs {
    #[arg(long)]
    company_name: String,
    #[arg(long)]
    gst_number: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    mobile_number: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long, default_value = qbank_console::forms::DEFAULT_COUNTRY)]
    country: String,
    #[arg(long)]
    pincode: String,
    #[arg(long, default_value = "")]
    website: String,
    #[arg(long, default_value = "")]
    industry: String,
    #[arg(long, default_value = "")]
    description: String,
}

impl From<CompanyArgs> for CompanyFormValues {
    fn from(args: CompanyArgs) -> Self {
        Self {
            company_name: args.company_name,
            gst_number: args.gst_number,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            mobile_number: args.mobile_number,
            address: args.address,
            city: args.city,
            state: args.state,
            country: args.country,
            pincode: args.pincode,
            website: args.website,
            industry: args.industry,
            description: args.description,
        }
    }
}

#[derive(Subcommand, Debug)]
enum DashboardCommands {
    /// Employee and question counts of a company
    Company { company_id: i64 },

    /// Question writer overview
    Writer {
        #[arg(long)]
        user_id: i64,
    },

    /// Reviewer overview; optionally report a question first
    Reviewer {
        #[arg(long)]
        user_id: i64,

        /// Question to invalidate
        #[arg(long, requires = "reason")]
        invalidate: Option<i64>,

        #[arg(long)]
        reason: Option<String>,

        #[arg(long, value_enum, default_value_t = SeverityArg::Low)]
        severity: SeverityArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SeverityArg {
    Low,
    Medium,
    High,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Low => Self::Low,
            SeverityArg::Medium => Self::Medium,
            SeverityArg::High => Self::High,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TemplateKind {
    Users,
    Roles,
    Questions,
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_gateway(config: &CliConfig) -> Result<Gateway> {
    let store = FileCredentialStore::open(&config.credential_path).with_context(|| {
        format!(
            "Failed to open credential file {}",
            config.credential_path.display()
        )
    })?;
    let hooks = Hooks::new(Arc::new(TerminalNotifier), Arc::new(LoginHint));
    Gateway::from_config(&config.gateway(), Session::new(Arc::new(store)), hooks)
        .context("Failed to build the HTTP client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config);
    debug!(base_url = %config.base_url, "configuration loaded");

    let gateway = build_gateway(&config)?;
    let console = Console {
        gateway: &gateway,
        config: &config,
        assume_yes: cli.yes,
    };

    match cli.command {
        Commands::Login { email, password } => console.login(email, password).await,
        Commands::Logout => {
            gateway.auth().logout().context("Failed to remove the stored token")?;
            println!("Signed out");
            Ok(())
        }
        Commands::Companies(command) => console.companies(command).await,
        Commands::Dashboard(command) => console.dashboard(command).await,
        Commands::Template { kind, dir } => console.template(kind, &dir).await,
    }
}

struct Console<'a> {
    gateway: &'a Gateway,
    config: &'a CliConfig,
    assume_yes: bool,
}

impl Console<'_> {
    fn operator(&self, user_id: i64, score: i64) -> CurrentUser {
        CurrentUser::new(user_id, score, self.config.permissions.iter().cloned())
    }

    async fn login(&self, email: String, password: Option<String>) -> Result<()> {
        let password = match password {
            Some(password) => password,
            None => tokio::task::spawn_blocking(|| terminal::prompt_line("Password: "))
                .await
                .context("Password prompt failed")?
                .context("Failed to read the password")?,
        };
        let login = self
            .gateway
            .auth()
            .login(&LoginRequest { email, password })
            .await
            .context("Sign-in failed")?;
        let name = login
            .user
            .as_ref()
            .map(qbank_sdk::User::full_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "user".to_owned());
        println!("Signed in as {name}");
        Ok(())
    }

    fn list_view(&self, filters: &ListArgs) -> CompanyListView<'_> {
        let confirm = Arc::new(StdinConfirm::new(self.assume_yes));
        CompanyListView::new(self.gateway, self.operator(0, 0), confirm)
            .with_page_size(filters.page_size.unwrap_or(self.config.page_size))
    }

    async fn companies(&self, command: CompanyCommands) -> Result<()> {
        match command {
            CompanyCommands::List(filters) => {
                let list = self.list_view(&filters);
                let mounted = list.mount(&filters.url_query()).await;
                println!("{}", render::company_table(&list.state()));
                mounted.context("Failed to list companies")
            }
            CompanyCommands::Show { id } => {
                let view = CompanyDetailView::new(self.gateway, self.operator(0, 0), id);
                if let Err(err) = view.mount().await {
                    debug!(company_id = id, error = %err, "company detail unavailable");
                }
                match view.state() {
                    DetailState::Loaded(company) => {
                        println!("{}", render::company_detail(&company));
                        Ok(())
                    }
                    DetailState::NotFound | DetailState::Loading => {
                        bail!("Company {id} not found")
                    }
                }
            }
            CompanyCommands::Create(args) => {
                let mut form = CompanyForm::new(self.gateway, FormMode::Create);
                form.values = args.into();
                match form.submit().await {
                    Ok(()) => Ok(()),
                    Err(ViewError::Invalid(errors)) => {
                        bail!("Company not saved:\n{}", render::form_errors(&errors))
                    }
                    Err(err) => Err(err).context("Failed to create the company"),
                }
            }
            CompanyCommands::Toggle { id, filters } => {
                let list = self.list_view(&filters);
                list.mount(&filters.url_query())
                    .await
                    .context("Failed to list companies")?;
                list.toggle_status(id).await.with_context(|| {
                    format!("Failed to change the status of company {id}")
                })
            }
            CompanyCommands::Delete { id } => {
                let list = self.list_view(&ListArgs::default());
                list.mount("").await.context("Failed to list companies")?;
                if !list.delete(id).await.context("Failed to delete the company")? {
                    println!("Cancelled");
                }
                Ok(())
            }
        }
    }

    async fn dashboard(&self, command: DashboardCommands) -> Result<()> {
        let now = Utc::now();
        match command {
            DashboardCommands::Company { company_id } => {
                let dashboard = CompanyDashboard::new(self.gateway, company_id);
                dashboard.mount().await.context("Failed to load the dashboard")?;
                if let Some(stats) = dashboard.state().data {
                    println!("{}", render::company_dashboard(&stats));
                }
            }
            DashboardCommands::Writer { user_id } => {
                let score = self.score_of(user_id).await?;
                let dashboard =
                    QuestionWriterDashboard::new(self.gateway, self.operator(user_id, score));
                dashboard.mount().await.context("Failed to load the dashboard")?;
                if let Some(snapshot) = dashboard.state().data {
                    println!("{}", render::writer_dashboard(&snapshot, now));
                }
            }
            DashboardCommands::Reviewer {
                user_id,
                invalidate,
                reason,
                severity,
            } => {
                let dashboard = ReviewerDashboard::new(self.gateway, self.operator(user_id, 0));
                dashboard.mount().await.context("Failed to load the dashboard")?;
                if let Some(question_id) = invalidate {
                    dashboard.open_invalidate(question_id);
                    dashboard.set_reason(reason.as_deref().unwrap_or_default());
                    dashboard.set_severity(severity.into());
                    match dashboard.submit_invalidation().await {
                        Ok(_) => info!(question_id, "question reported"),
                        Err(ViewError::Invalid(errors)) => {
                            bail!("Report not sent:\n{}", render::form_errors(&errors))
                        }
                        Err(err) => return Err(err).context("Failed to report the question"),
                    }
                }
                if let Some(snapshot) = dashboard.state().data {
                    println!("{}", render::reviewer_dashboard(&snapshot, now));
                }
            }
        }
        Ok(())
    }

    async fn score_of(&self, user_id: i64) -> Result<i64> {
        let user = self
            .gateway
            .users()
            .get(user_id)
            .await
            .with_context(|| format!("Failed to load user {user_id}"))?;
        Ok(user.score.unwrap_or_default())
    }

    async fn template(&self, kind: TemplateKind, dir: &Path) -> Result<()> {
        let download = match kind {
            TemplateKind::Users => self.gateway.users().download_template().await?,
            TemplateKind::Roles => self.gateway.roles().download_template().await?,
            TemplateKind::Questions => match self.gateway.questions().download_template().await? {
                Outcome::Success(download) => download,
                rejected => {
                    return Err(anyhow!(
                        "Template not available: {}",
                        rejected.message().unwrap_or(MSG_GENERIC)
                    ));
                }
            },
        };
        let path = download
            .save_into(dir)
            .await
            .with_context(|| format!("Failed to save the template into {}", dir.display()))?;
        println!("Saved {}", path.display());
        Ok(())
    }
}
