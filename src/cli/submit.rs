//! `submit`: send a YouTube URL to the conversion backend.

use chrono::Utc;

use super::OutputOptions;
use crate::cli::args::SubmitArgs;
use crate::core::http::build_client;
use crate::core::models::SubmissionReport;
use crate::core::session::ensure_valid;
use crate::core::submit::{submit, validate_video_url};
use crate::error::Result;
use crate::render;
use crate::render::progress::Spinner;
use crate::storage::ResolvedConfig;
use crate::storage::token_store::LocalStorage;

/// Execute the submit command.
///
/// Returns whether the backend accepted the submission. A rejected
/// submission is rendered here, not returned as an error.
///
/// # Errors
///
/// Returns an error if not logged in, the backend URL is unset, or the
/// URL is invalid. Nothing is sent in those cases.
pub async fn execute(args: &SubmitArgs, config: &ResolvedConfig, out: OutputOptions) -> Result<bool> {
    let timeout = config.timeout.value;
    let client = build_client(timeout)?;
    let mut storage = LocalStorage::load(&config.storage_path)?;

    let token = ensure_valid(&client, config.oauth().as_ref(), &mut storage, Utc::now()).await?;
    let backend_url = config.require_backend_url()?;

    let raw = match &args.url {
        Some(url) => url.clone(),
        None => super::read_line("YouTube URL: ")?,
    };
    let youtube_url = validate_video_url(&raw)?;

    let spinner = Spinner::start("Converting playlist", out.interactive());
    let outcome = submit(&client, backend_url, &token, &youtube_url, timeout).await;
    spinner.finish();

    let report = SubmissionReport {
        outcome,
        backend_url: backend_url.to_string(),
    };
    println!(
        "{}",
        render::render_submission(&report, out.format, out.pretty, out.no_color)?
    );
    Ok(report.outcome.delivered)
}
