//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional configuration file,
//! then `PUBMED_PAPERS_*` environment variables (nested keys use `__`, e.g.
//! `PUBMED_PAPERS_EUTILS__MAX_RESULTS=20`). Command-line flags are applied on
//! top by the binary.
//!
//! # Configuration File Format
//!
//! ```toml
//! [eutils]
//! search_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
//! summary_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi"
//! database = "pubmed"
//! max_results = 50
//!
//! [http]
//! timeout_secs = 30  # 0 disables the request timeout
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::DEFAULT_MAX_RESULTS;

/// File name looked up by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "pubmed-papers.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PUBMED_PAPERS";

/// NCBI ESearch endpoint
pub const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// NCBI ESummary endpoint
pub const ESUMMARY_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// E-utilities endpoints and query parameters
    #[serde(default)]
    pub eutils: EutilsConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// E-utilities configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EutilsConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_summary_url")]
    pub summary_url: String,

    /// Value of the `db` parameter
    #[serde(default = "default_database")]
    pub database: String,

    /// Value of the `retmax` parameter
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for EutilsConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            summary_url: default_summary_url(),
            database: default_database(),
            max_results: default_max_results(),
        }
    }
}

impl EutilsConfig {
    /// Point both endpoints at `base_url`, keeping the E-utilities script names.
    ///
    /// Used to run against a local mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            search_url: format!("{}/esearch.fcgi", base),
            summary_url: format!("{}/esummary.fcgi", base),
            ..Self::default()
        }
    }
}

fn default_search_url() -> String {
    ESEARCH_URL.to_string()
}

fn default_summary_url() -> String {
    ESUMMARY_URL.to_string()
}

fn default_database() -> String {
    "pubmed".to_string()
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent to NCBI
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when neither `RUST_LOG` nor a verbosity flag is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Look for a configuration file in the working directory, then in the user
/// configuration directory (`<config_dir>/pubmed-papers/config.toml`).
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("pubmed-papers").join("config.toml"))
        .filter(|path| path.is_file())
}
