use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use qbank_console::{DEFAULT_PAGE_SIZE, permissions};
use qbank_gateway::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GatewayConfig};
use serde::{Deserialize, Serialize};

/// Prefix of the environment variables read on top of the config file.
pub const ENV_PREFIX: &str = "QBANK_";

/// Settings of the `qbank` binary.
///
/// Layered lowest to highest: built-in defaults, the YAML file given with
/// `--config`, then `QBANK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
    /// Where the bearer token is kept between runs.
    pub credential_path: PathBuf,
    /// `tracing` filter directives; `RUST_LOG` wins when set.
    pub log_filter: String,
    /// Permissions the console screens are opened with. The backend still
    /// enforces its own checks.
    pub permissions: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            page_size: DEFAULT_PAGE_SIZE,
            credential_path: default_credential_path(),
            log_filter: "info".to_owned(),
            permissions: [
                permissions::COMPANY_VIEW,
                permissions::COMPANY_CREATE,
                permissions::COMPANY_EDIT,
                permissions::COMPANY_DELETE,
            ]
            .map(str::to_owned)
            .to_vec(),
        }
    }
}

fn default_credential_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qbank")
        .join("token")
}

impl CliConfig {
    /// Defaults merged with the optional YAML file.
    fn layered(path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        match path {
            Some(path) => figment.merge(Yaml::file(path)),
            None => figment,
        }
    }

    /// Load the full layering, environment included.
    ///
    /// # Errors
    /// A value of the wrong type in the file or the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::layered(path)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    #[must_use]
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig::new(&self.base_url).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
