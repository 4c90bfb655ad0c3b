//! `logout`: forget stored tokens.

use super::OutputOptions;
use crate::core::models::LogoutReport;
use crate::error::Result;
use crate::render;
use crate::storage::ResolvedConfig;
use crate::storage::token_store::{LocalStorage, StoredToken, clear_token};

/// Execute the logout command.
///
/// # Errors
///
/// Returns an error if storage cannot be read or written.
pub fn execute(config: &ResolvedConfig, out: OutputOptions) -> Result<()> {
    let mut storage = LocalStorage::load(&config.storage_path)?;
    let removed = StoredToken::load(&storage).is_present();
    clear_token(&mut storage)?;
    tracing::info!(removed, "Logged out");

    let report = LogoutReport {
        removed,
        storage_path: storage.path().map(|p| p.display().to_string()),
    };
    println!(
        "{}",
        render::render_logout(&report, out.format, out.pretty, out.no_color)?
    );
    Ok(())
}
