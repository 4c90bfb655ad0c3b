//! Configuration file loading and resolution.
//!
//! Loads configuration from `config.toml` in the platform config directory
//! (for example `~/.config/yt2spotify/config.toml` on Linux).
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `YT2S_API_URL`: Backend endpoint that accepts submissions
//! - `YT2S_SPOTIFY_CLIENT_ID`: Spotify application client ID
//! - `YT2S_SPOTIFY_REDIRECT_URL`: OAuth redirect URL
//! - `YT2S_SPOTIFY_ACCOUNTS_URL`: Accounts service base URL
//! - `YT2S_SPOTIFY_API_URL`: Web API base URL
//! - `YT2S_TIMEOUT`: HTTP timeout in seconds
//! - `YT2S_FORMAT`: Output format (human, json, md)
//! - `YT2S_NO_COLOR` or `NO_COLOR`: Disable colors
//! - `YT2S_PRETTY`: Pretty-print JSON output
//! - `YT2S_CONFIG`: Override config file path
//! - `YT2S_STORAGE`: Override token storage path

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::cli::args::{Cli, OutputFormat};
use crate::core::oauth::{DEFAULT_ACCOUNTS_URL, OAuthSettings};
use crate::core::profile::DEFAULT_API_URL;
use crate::error::{Result, Yt2sError};

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_API_URL: &str = "YT2S_API_URL";
pub const ENV_CLIENT_ID: &str = "YT2S_SPOTIFY_CLIENT_ID";
pub const ENV_REDIRECT_URL: &str = "YT2S_SPOTIFY_REDIRECT_URL";
pub const ENV_ACCOUNTS_URL: &str = "YT2S_SPOTIFY_ACCOUNTS_URL";
pub const ENV_SPOTIFY_API_URL: &str = "YT2S_SPOTIFY_API_URL";
pub const ENV_TIMEOUT: &str = "YT2S_TIMEOUT";
pub const ENV_FORMAT: &str = "YT2S_FORMAT";
pub const ENV_NO_COLOR: &str = "YT2S_NO_COLOR";
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";
pub const ENV_PRETTY: &str = "YT2S_PRETTY";
pub const ENV_CONFIG: &str = "YT2S_CONFIG";
pub const ENV_STORAGE: &str = "YT2S_STORAGE";

/// Redirect URL used when none is configured.
pub const DEFAULT_REDIRECT_URL: &str = "http://127.0.0.1:8888/callback";

const MAX_TIMEOUT_SECONDS: u64 = 300;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    ConfigFile,
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved value and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> Sourced<T> {
    const fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub client_id: Sourced<Option<String>>,
    pub redirect_url: Sourced<String>,
    pub accounts_url: Sourced<String>,
    pub spotify_api_url: Sourced<String>,
    pub backend_url: Sourced<Option<String>>,
    pub timeout: Sourced<Duration>,
    pub format: Sourced<OutputFormat>,
    pub no_color: Sourced<bool>,
    pub pretty: Sourced<bool>,
    pub config_path: PathBuf,
    pub storage_path: PathBuf,
}

fn non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// First non-blank value among CLI, env and file.
fn pick(
    cli: Option<&str>,
    env: Option<String>,
    file: Option<&str>,
) -> Option<Sourced<String>> {
    if let Some(v) = cli.filter(|v| non_blank(v)) {
        return Some(Sourced::new(v.trim().to_string(), ConfigSource::Cli));
    }
    if let Some(v) = env.filter(|v| non_blank(v)) {
        return Some(Sourced::new(v.trim().to_string(), ConfigSource::Env));
    }
    file.filter(|v| non_blank(v))
        .map(|v| Sourced::new(v.trim().to_string(), ConfigSource::ConfigFile))
}

fn pick_or(
    cli: Option<&str>,
    env: Option<String>,
    file: Option<&str>,
    default: &str,
) -> Sourced<String> {
    pick(cli, env, file).unwrap_or_else(|| Sourced::new(default.to_string(), ConfigSource::Default))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn validate_url(key: &str, value: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(value).map_err(|e| Yt2sError::ConfigInvalid {
        key: key.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })?;
    if matches!(parsed.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(Yt2sError::ConfigInvalid {
            key: key.to_string(),
            value: value.to_string(),
            message: "expected an http(s) URL".to_string(),
        })
    }
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.trim().to_lowercase().as_str() {
        "human" => Ok(OutputFormat::Human),
        "json" => Ok(OutputFormat::Json),
        "md" | "markdown" => Ok(OutputFormat::Md),
        _ => Err(Yt2sError::ConfigInvalid {
            key: "format".to_string(),
            value: s.to_string(),
            message: "valid formats: human, json, md".to_string(),
        }),
    }
}

fn check_timeout(seconds: u64) -> Result<Duration> {
    if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
        return Err(Yt2sError::ConfigInvalid {
            key: "timeout_seconds".to_string(),
            value: seconds.to_string(),
            message: format!("Timeout must be between 1 and {MAX_TIMEOUT_SECONDS} seconds"),
        });
    }
    Ok(Duration::from_secs(seconds))
}

impl ResolvedConfig {
    /// Resolve from the CLI, the process environment and the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or any
    /// resolved value is invalid.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// See [`ResolvedConfig::resolve`].
    pub fn resolve_with(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let paths = AppPaths::new();
        let config_path = env(ENV_CONFIG)
            .filter(|v| non_blank(v))
            .map_or_else(|| paths.config_file(), PathBuf::from);
        let storage_path = env(ENV_STORAGE)
            .filter(|v| non_blank(v))
            .map_or_else(|| paths.storage_file(), PathBuf::from);

        let config = Config::load_from(&config_path)?;
        config.validate()?;

        Self::merge(cli, &config, env, config_path, storage_path)
    }

    /// Merge already-loaded sources.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid URLs, formats or timeouts.
    pub fn merge(
        cli: &Cli,
        config: &Config,
        env: impl Fn(&str) -> Option<String>,
        config_path: PathBuf,
        storage_path: PathBuf,
    ) -> Result<Self> {
        let client_id = pick(
            cli.client_id.as_deref(),
            env(ENV_CLIENT_ID),
            config.spotify.client_id.as_deref(),
        )
        .map_or_else(
            || Sourced::new(None, ConfigSource::Default),
            |s| Sourced::new(Some(s.value), s.source),
        );

        let redirect_url = pick_or(
            cli.redirect_url.as_deref(),
            env(ENV_REDIRECT_URL),
            config.spotify.redirect_url.as_deref(),
            DEFAULT_REDIRECT_URL,
        );
        validate_url("redirect_url", &redirect_url.value)?;

        let accounts_url = pick_or(
            None,
            env(ENV_ACCOUNTS_URL),
            config.spotify.accounts_url.as_deref(),
            DEFAULT_ACCOUNTS_URL,
        );
        validate_url("accounts_url", &accounts_url.value)?;

        let spotify_api_url = pick_or(
            None,
            env(ENV_SPOTIFY_API_URL),
            config.spotify.api_url.as_deref(),
            DEFAULT_API_URL,
        );
        validate_url("spotify_api_url", &spotify_api_url.value)?;

        let backend_url = match pick(
            cli.api_url.as_deref(),
            env(ENV_API_URL),
            config.backend.url.as_deref(),
        ) {
            Some(s) => {
                validate_url("api_url", &s.value)?;
                Sourced::new(Some(s.value), s.source)
            }
            None => Sourced::new(None, ConfigSource::Default),
        };

        let timeout = if let Some(seconds) = cli.timeout {
            Sourced::new(check_timeout(seconds)?, ConfigSource::Cli)
        } else if let Some(raw) = env(ENV_TIMEOUT).filter(|v| non_blank(v)) {
            let seconds = raw.trim().parse::<u64>().map_err(|e| Yt2sError::ConfigInvalid {
                key: ENV_TIMEOUT.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            })?;
            Sourced::new(check_timeout(seconds)?, ConfigSource::Env)
        } else {
            let source = if config.general.timeout_seconds == GeneralConfig::default().timeout_seconds {
                ConfigSource::Default
            } else {
                ConfigSource::ConfigFile
            };
            Sourced::new(check_timeout(config.general.timeout_seconds)?, source)
        };

        let format = if let Some(format) = cli.cli_format() {
            Sourced::new(format, ConfigSource::Cli)
        } else if let Some(raw) = env(ENV_FORMAT).filter(|v| non_blank(v)) {
            Sourced::new(parse_format(&raw)?, ConfigSource::Env)
        } else if let Some(raw) = config.output.format.as_deref() {
            Sourced::new(parse_format(raw)?, ConfigSource::ConfigFile)
        } else {
            Sourced::new(OutputFormat::Human, ConfigSource::Default)
        };

        let no_color = if cli.no_color {
            Sourced::new(true, ConfigSource::Cli)
        } else if env(ENV_NO_COLOR).is_some_and(|v| is_truthy(&v)) || env(ENV_NO_COLOR_STD).is_some() {
            Sourced::new(true, ConfigSource::Env)
        } else if !config.output.color {
            Sourced::new(true, ConfigSource::ConfigFile)
        } else {
            Sourced::new(false, ConfigSource::Default)
        };

        let pretty = if cli.pretty {
            Sourced::new(true, ConfigSource::Cli)
        } else if env(ENV_PRETTY).is_some_and(|v| is_truthy(&v)) {
            Sourced::new(true, ConfigSource::Env)
        } else if config.output.pretty {
            Sourced::new(true, ConfigSource::ConfigFile)
        } else {
            Sourced::new(false, ConfigSource::Default)
        };

        Ok(Self {
            client_id,
            redirect_url,
            accounts_url,
            spotify_api_url,
            backend_url,
            timeout,
            format,
            no_color,
            pretty,
            config_path,
            storage_path,
        })
    }

    /// OAuth settings, if a client ID is configured.
    #[must_use]
    pub fn oauth(&self) -> Option<OAuthSettings> {
        self.client_id.value.as_ref().map(|client_id| OAuthSettings {
            client_id: client_id.clone(),
            redirect_url: self.redirect_url.value.clone(),
            accounts_url: self.accounts_url.value.clone(),
            timeout: self.timeout.value,
        })
    }

    /// OAuth settings, or an error naming the missing client ID.
    ///
    /// # Errors
    ///
    /// Returns [`Yt2sError::ConfigMissing`] if no client ID is configured.
    pub fn require_oauth(&self) -> Result<OAuthSettings> {
        self.oauth().ok_or_else(|| Yt2sError::ConfigMissing {
            key: "client_id".to_string(),
            env: ENV_CLIENT_ID.to_string(),
        })
    }

    /// Backend URL, or an error naming the missing setting.
    ///
    /// # Errors
    ///
    /// Returns [`Yt2sError::ConfigMissing`] if no backend URL is configured.
    pub fn require_backend_url(&self) -> Result<&str> {
        self.backend_url
            .value
            .as_deref()
            .ok_or_else(|| Yt2sError::ConfigMissing {
                key: "api_url".to_string(),
                env: ENV_API_URL.to_string(),
            })
    }
}

// =============================================================================
// Config File
// =============================================================================

/// Application configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub spotify: SpotifyConfig,
    pub backend: BackendConfig,
    pub output: OutputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Timeout for network requests in seconds.
    pub timeout_seconds: u64,
}

/// Spotify application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub redirect_url: Option<String>,
    pub accounts_url: Option<String>,
    pub api_url: Option<String>,
}

/// Conversion backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format (human, json, md).
    pub format: Option<String>,
    /// Whether to use colors in output.
    pub color: bool,
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: crate::core::http::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            pretty: false,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Yt2sError::Config(format!("Invalid config file {}: {e}", path.display())))
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Yt2sError::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content)?;
        tracing::debug!(?path, "Config file saved");
        Ok(())
    }

    /// Validate values that can be checked without other sources.
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = &self.output.format {
            parse_format(format)?;
        }
        check_timeout(self.general.timeout_seconds)?;
        Ok(())
    }
}
