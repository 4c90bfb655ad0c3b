//! `config`: show resolved settings and their sources.

use super::OutputOptions;
use crate::core::models::{ConfigEntry, ConfigReport};
use crate::error::Result;
use crate::render;
use crate::storage::ResolvedConfig;
use crate::storage::config::Sourced;

fn entry<T>(key: &str, sourced: &Sourced<T>, show: impl Fn(&T) -> Option<String>) -> ConfigEntry {
    ConfigEntry {
        key: key.to_string(),
        value: show(&sourced.value),
        source: sourced.source.to_string(),
    }
}

/// Build the report for `config`.
#[must_use]
pub fn report(config: &ResolvedConfig) -> ConfigReport {
    let entries = vec![
        entry("client_id", &config.client_id, Clone::clone),
        entry("redirect_url", &config.redirect_url, |v| Some(v.clone())),
        entry("api_url", &config.backend_url, Clone::clone),
        entry("spotify_accounts_url", &config.accounts_url, |v| Some(v.clone())),
        entry("spotify_api_url", &config.spotify_api_url, |v| Some(v.clone())),
        entry("timeout_seconds", &config.timeout, |v| Some(v.as_secs().to_string())),
        entry("format", &config.format, |v| {
            Some(format!("{v:?}").to_lowercase())
        }),
        entry("no_color", &config.no_color, |v| Some(v.to_string())),
        entry("pretty", &config.pretty, |v| Some(v.to_string())),
    ];

    ConfigReport {
        config_path: config.config_path.display().to_string(),
        config_exists: config.config_path.exists(),
        storage_path: config.storage_path.display().to_string(),
        entries,
    }
}

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(config: &ResolvedConfig, out: OutputOptions) -> Result<()> {
    println!(
        "{}",
        render::render_config(&report(config), out.format, out.pretty, out.no_color)?
    );
    Ok(())
}
