//! Client configuration.
//!
//! Settings are layered: built-in defaults, then the JSON config file, then
//! flags and `ARBOR_*` environment variables. The result is immutable and
//! handed to the transport.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::CliError;

/// Server URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8888/";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Effective client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST API.
    pub api_url: Url,
    /// Basic-auth user.
    pub user: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Values from flags and environment, each overriding the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--api-url` / `ARBOR_API_URL`.
    pub api_url: Option<String>,
    /// `--user` / `ARBOR_USER`.
    pub user: Option<String>,
    /// `--password` / `ARBOR_PASSWORD`.
    pub password: Option<String>,
    /// `--timeout` / `ARBOR_TIMEOUT`, in seconds.
    pub timeout: Option<u64>,
    /// `--config`: explicit config file.
    pub config: Option<PathBuf>,
}

/// On-disk config file layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FileConfig {
    api_url: Option<String>,
    user: Option<String>,
    password: Option<String>,
    timeout: Option<u64>,
}

impl Config {
    /// Resolve the effective configuration.
    ///
    /// An explicit `--config` file must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or the API
    /// URL is invalid.
    pub fn load(overrides: &Overrides) -> Result<Self, CliError> {
        let file = match &overrides.config {
            Some(path) => read_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => read_file(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::layer(file, overrides)
    }

    fn layer(file: FileConfig, overrides: &Overrides) -> Result<Self, CliError> {
        let raw = overrides
            .api_url
            .as_deref()
            .or(file.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL);
        let api_url = Url::parse(raw)
            .map_err(|e| CliError::Config(format!("invalid API URL {raw}: {e}")))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(CliError::Config(format!(
                "invalid API URL {raw}, must start with http:// or https://"
            )));
        }

        Ok(Self {
            api_url,
            user: overrides.user.clone().or(file.user),
            password: overrides.password.clone().or(file.password),
            timeout: overrides
                .timeout
                .or(file.timeout)
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        })
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }
}

/// `<config dir>/arbor/arboradm.json`.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("arbor").join("arboradm.json"))
}

fn read_file(path: &Path) -> Result<FileConfig, CliError> {
    debug!(path = %path.display(), "Reading config file");
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::Config(format!("cannot parse {}: {e}", path.display())))
}
