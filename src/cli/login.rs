//! `login`: Spotify authorization code flow with PKCE.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;

use super::OutputOptions;
use crate::cli::args::LoginArgs;
use crate::core::callback::{CallbackListener, LoopbackTarget, parse_callback_input};
use crate::core::http::build_client;
use crate::core::models::{LoginReport, TokenSummary};
use crate::core::oauth::{OAuthSettings, authorize_url};
use crate::core::pkce::PkcePair;
use crate::core::profile::fetch_profile;
use crate::core::session;
use crate::error::Result;
use crate::render;
use crate::storage::ResolvedConfig;
use crate::storage::token_store::{KEY_CODE_VERIFIER, LocalStorage, StoredToken};

/// Execute the login command.
///
/// # Errors
///
/// Returns configuration, storage, callback or token endpoint errors.
pub async fn execute(args: &LoginArgs, config: &ResolvedConfig, out: OutputOptions) -> Result<()> {
    args.validate()?;
    let settings = config.require_oauth()?;
    let client = build_client(config.timeout.value)?;
    let mut storage = LocalStorage::load(&config.storage_path)?;

    if !args.force {
        match session::ensure_valid(&client, Some(&settings), &mut storage, Utc::now()).await {
            Ok(_) => {
                tracing::debug!("Stored token is usable, skipping login");
                return print_report(&client, config, &storage, true, out).await;
            }
            Err(err) => tracing::debug!(error = %err, "No usable token, starting login"),
        }
    }

    let pkce = PkcePair::generate();
    storage.set_item(KEY_CODE_VERIFIER, pkce.verifier.as_str())?;
    let url = authorize_url(&settings, &pkce.challenge)?;

    let listener = if args.no_listen {
        None
    } else {
        bind_listener(&settings).await
    };

    let code = if let Some(listener) = listener {
        eprintln!("Open this URL in your browser to log in with Spotify:\n\n  {url}\n");
        eprintln!("Waiting for Spotify to redirect back to {} ...", settings.redirect_url);
        listener.wait_for_code(Duration::from_secs(args.wait)).await?
    } else {
        eprintln!("Open this URL in your browser to log in with Spotify:\n\n  {url}\n");
        if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
            eprintln!(
                "After approving, finish with:\n\n  yt2spotify callback '<the URL you were redirected to>'"
            );
            return Ok(());
        }
        let pasted = super::read_line("Paste the URL you were redirected to: ")?;
        parse_callback_input(&pasted)?
    };

    session::complete_login(&client, &settings, &mut storage, &code, Utc::now()).await?;
    print_report(&client, config, &storage, false, out).await
}

/// Bind the loopback listener, or `None` when the redirect URL cannot be
/// served locally or the port is taken.
async fn bind_listener(settings: &OAuthSettings) -> Option<CallbackListener> {
    let Some(target) = LoopbackTarget::from_redirect_url(&settings.redirect_url) else {
        tracing::info!(
            redirect_url = %settings.redirect_url,
            "Redirect URL is not a local http address, falling back to manual paste"
        );
        return None;
    };

    match CallbackListener::bind(&target).await {
        Ok(listener) => Some(listener),
        Err(err) => {
            tracing::warn!(addr = %target.addr, error = %err, "Cannot listen for the callback");
            None
        }
    }
}

/// Render the login result, greeting the user by name when the profile loads.
pub(crate) async fn print_report(
    client: &Client,
    config: &ResolvedConfig,
    storage: &LocalStorage,
    already_logged_in: bool,
    out: OutputOptions,
) -> Result<()> {
    let now = Utc::now();
    let stored = StoredToken::load(storage);

    let profile = match stored.access_token.as_deref() {
        Some(token) => fetch_profile(
            client,
            &config.spotify_api_url.value,
            token,
            config.timeout.value,
        )
        .await
        .map_err(|err| tracing::warn!(error = %err, "Could not load the Spotify profile"))
        .ok(),
        None => None,
    };

    let report = LoginReport {
        already_logged_in,
        token: TokenSummary::of(&stored, now),
        profile,
    };
    println!(
        "{}",
        render::render_login(&report, now, out.format, out.pretty, out.no_color)?
    );
    Ok(())
}
