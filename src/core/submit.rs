//! Submission of a YouTube URL to the conversion backend.
//!
//! The backend is opaque: it takes `{ spotifyToken, youtubeUrl }` and
//! answers `{ message }`.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::http::{error_body, map_send_error};
use crate::error::{Result, SUBMISSION_FAILED_MESSAGE, Yt2sError};

/// Request body sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub spotify_token: String,
    pub youtube_url: String,
}

/// Response body returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub message: String,
}

/// What the user sees once the submission settles.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub delivered: bool,
    pub message: String,
    pub youtube_url: String,
}

impl SubmissionOutcome {
    fn failed(youtube_url: &str) -> Self {
        Self {
            delivered: false,
            message: SUBMISSION_FAILED_MESSAGE.to_string(),
            youtube_url: youtube_url.to_string(),
        }
    }
}

/// Check the entered URL before anything is sent.
///
/// # Errors
///
/// Returns [`Yt2sError::InvalidVideoUrl`] for an empty or unparsable URL.
pub fn validate_video_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Yt2sError::InvalidVideoUrl("the URL is empty".to_string()));
    }

    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| Yt2sError::InvalidVideoUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Yt2sError::InvalidVideoUrl(format!(
            "{trimmed}: expected an http(s) URL"
        )));
    }

    Ok(trimmed.to_string())
}

/// POST the submission once and return the backend's message.
///
/// # Errors
///
/// Returns [`Yt2sError::SubmissionFailed`] for any failure: transport,
/// non-2xx status or an unreadable body.
pub async fn post_submission(
    client: &Client,
    backend_url: &str,
    request: &SubmissionRequest,
    timeout: Duration,
) -> Result<SubmissionResponse> {
    let response = client
        .post(backend_url)
        .json(request)
        .send()
        .await
        .map_err(|e| Yt2sError::SubmissionFailed {
            reason: map_send_error(&e, timeout).to_string(),
        })?;

    if !response.status().is_success() {
        let (status, body) = error_body(response).await;
        return Err(Yt2sError::SubmissionFailed {
            reason: format!("HTTP {status}: {body}"),
        });
    }

    response
        .json::<SubmissionResponse>()
        .await
        .map_err(|e| Yt2sError::SubmissionFailed {
            reason: format!("unreadable response: {e}"),
        })
}

/// Submit and fold every failure into the fixed user-facing message.
///
/// The underlying cause is logged, never shown.
pub async fn submit(
    client: &Client,
    backend_url: &str,
    spotify_token: &str,
    youtube_url: &str,
    timeout: Duration,
) -> SubmissionOutcome {
    let request = SubmissionRequest {
        spotify_token: spotify_token.to_string(),
        youtube_url: youtube_url.to_string(),
    };

    tracing::info!(%backend_url, %youtube_url, "Submitting YouTube URL");

    match post_submission(client, backend_url, &request, timeout).await {
        Ok(response) => SubmissionOutcome {
            delivered: true,
            message: response.message,
            youtube_url: youtube_url.to_string(),
        },
        Err(err) => {
            let reason = match &err {
                Yt2sError::SubmissionFailed { reason } => reason.clone(),
                other => other.to_string(),
            };
            tracing::error!(%reason, "Error uploading to YouTube");
            SubmissionOutcome::failed(youtube_url)
        }
    }
}
