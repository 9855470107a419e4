use std::time::Duration;

use crate::error::GatewayError;
use crate::hooks::{Hooks, Notice};
use crate::interceptors;
use crate::request::Request;
use crate::response::Response;
use crate::session::Session;
use crate::transport::HttpTransport;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`Gateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GatewayConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `QBANK_BASE_URL`: backend base URL (default: `http://localhost:5000/api`)
    /// - `QBANK_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    ///
    /// # Errors
    /// Returns `GatewayError::Build` if `QBANK_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url =
            std::env::var("QBANK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var("QBANK_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| GatewayError::Build(format!("QBANK_TIMEOUT_SECS: {e}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// The single HTTP client of the console.
///
/// Every call made through it carries the session credential, is logged, and
/// on failure is classified into a [`GatewayError`] after the matching
/// notification has been delivered through [`Hooks`].
pub struct Gateway {
    transport: HttpTransport,
    session: Session,
    hooks: Hooks,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Create the gateway from configuration and its session context
    ///
    /// # Errors
    /// Returns `GatewayError::Build` if the HTTP client cannot be constructed.
    pub fn from_config(
        config: &GatewayConfig,
        session: Session,
        hooks: Hooks,
    ) -> Result<Self, GatewayError> {
        let transport = HttpTransport::new(&config.base_url, config.timeout)?;
        Ok(Self {
            transport,
            session,
            hooks,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Deliver a notice through the configured notifier.
    pub fn notify(&self, notice: Notice) {
        self.hooks.notifier.notify(notice);
    }

    /// Execute a request against the backend
    ///
    /// Statuses accepted by the request's [`crate::StatusPolicy`] resolve to
    /// `Ok`. Everything else is classified, reported and returned as `Err`.
    ///
    /// # Errors
    /// See [`GatewayError`] for the taxonomy.
    pub async fn execute(&self, request: Request) -> Result<Response, GatewayError> {
        let url = self.transport.url_for(request.path());
        let policy = request.status_policy();
        interceptors::log_request(&url, &request);

        let credential = self.session.credential();
        let response = match self.transport.send(request, credential.as_ref()).await {
            Ok(response) => response,
            Err(err) => {
                interceptors::report(&err, &url, &self.session, &self.hooks);
                return Err(err);
            }
        };
        interceptors::log_response(&url, &response);

        if policy.accepts(response.status()) {
            return Ok(response);
        }

        let err = interceptors::classify(response.status(), response.body());
        interceptors::report(&err, &url, &self.session, &self.hooks);
        Err(err)
    }
}
