//! `callback`: finish a login from the redirected URL or a bare code.

use chrono::Utc;

use super::OutputOptions;
use crate::cli::args::CallbackArgs;
use crate::core::callback::parse_callback_input;
use crate::core::http::build_client;
use crate::core::session;
use crate::error::Result;
use crate::storage::ResolvedConfig;
use crate::storage::token_store::LocalStorage;

/// Execute the callback command.
///
/// # Errors
///
/// Returns an error for unparsable input, a denied authorization, a missing
/// verifier or a failed exchange.
pub async fn execute(
    args: &CallbackArgs,
    config: &ResolvedConfig,
    out: OutputOptions,
) -> Result<()> {
    let code = parse_callback_input(&args.input)?;
    let settings = config.require_oauth()?;
    let client = build_client(config.timeout.value)?;
    let mut storage = LocalStorage::load(&config.storage_path)?;

    session::complete_login(&client, &settings, &mut storage, &code, Utc::now()).await?;
    super::login::print_report(&client, config, &storage, false, out).await
}
