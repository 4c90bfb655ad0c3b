//! `account`: show the logged-in Spotify profile.

use chrono::Utc;

use super::OutputOptions;
use crate::core::http::build_client;
use crate::core::models::{AccountView, TokenSummary};
use crate::core::profile::fetch_profile;
use crate::core::session::ensure_valid;
use crate::error::Result;
use crate::render;
use crate::storage::ResolvedConfig;
use crate::storage::token_store::{LocalStorage, StoredToken};

/// Execute the account command.
///
/// # Errors
///
/// [`crate::error::Yt2sError::NotAuthenticated`] without a stored token,
/// otherwise refresh or Spotify API errors.
pub async fn execute(config: &ResolvedConfig, out: OutputOptions) -> Result<()> {
    let client = build_client(config.timeout.value)?;
    let mut storage = LocalStorage::load(&config.storage_path)?;

    let token = ensure_valid(&client, config.oauth().as_ref(), &mut storage, Utc::now()).await?;
    let profile = fetch_profile(
        &client,
        &config.spotify_api_url.value,
        &token,
        config.timeout.value,
    )
    .await?;

    let now = Utc::now();
    let view = AccountView {
        profile,
        token: TokenSummary::of(&StoredToken::load(&storage), now),
    };
    println!(
        "{}",
        render::render_account(&view, now, out.format, out.pretty, out.no_color)?
    );
    Ok(())
}
