//! Application settings loaded from config.toml and the environment.
//!
//! `config.toml` holds the backend location, timeouts and export settings. Credentials
//! for the backend are never written to the file; they come from `DECOR_API_USERNAME`
//! and `DECOR_API_PASSWORD` (usually via `.env`).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const CONFIG_PATH_VAR: &str = "DECOR_CONFIG";
const USERNAME_VAR: &str = "DECOR_API_USERNAME";
const PASSWORD_VAR: &str = "DECOR_API_PASSWORD";

/// Whole config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend connection
    #[serde(default)]
    pub api: ApiConfig,
    /// Print and PDF output
    #[serde(default)]
    pub export: ExportConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL, including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Print and PDF export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving previews and downloaded PDFs
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Command run with the preview path appended (e.g., `["lp"]`); `None` leaves
    /// printing to the preview page itself
    #[serde(default)]
    pub print_command: Option<Vec<String>>,
    /// How long the print sink waits for the preview to finish rendering, in seconds
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            print_command: None,
            render_timeout_secs: default_render_timeout_secs(),
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub const fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://cors-h05i.onrender.com/api".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("invoices")
}

const fn default_render_timeout_secs() -> u64 {
    5
}

/// Basic-auth credentials for the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Basic-auth user
    pub username: String,
    /// Basic-auth password, never logged
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    /// Reads credentials from the environment; `None` if either variable is unset or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let username = std::env::var(USERNAME_VAR).ok()?;
        let password = std::env::var(PASSWORD_VAR).ok()?;
        if username.trim().is_empty() || password.is_empty() {
            return None;
        }
        Some(Self { username, password })
    }
}

/// Parses settings from a TOML file.
///
/// # Errors
/// Returns `Config` if the file cannot be read or is not valid TOML for [`AppConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {}: {e}", path_ref.display()),
    })
}

fn parse_config(contents: &str) -> std::result::Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Loads settings from `DECOR_CONFIG` or `./config.toml`.
///
/// A missing default file is not an error: built-in defaults are used. A file named
/// explicitly through `DECOR_CONFIG` must exist.
///
/// # Errors
/// Returns `Config` if the chosen file cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return load_config(path);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_config(DEFAULT_CONFIG_PATH);
    }

    tracing::info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
    Ok(AppConfig::default())
}
