//! HTTP client utilities.
//!
//! Provides the shared HTTP client for the token, profile and backend calls.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};

use crate::error::{Result, Yt2sError};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(format!("yt2spotify/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Yt2sError::Network(e.to_string()))
}

/// Map a transport-level reqwest error.
#[must_use]
pub fn map_send_error(err: &reqwest::Error, timeout: Duration) -> Yt2sError {
    if err.is_timeout() {
        Yt2sError::Timeout(timeout.as_secs())
    } else {
        Yt2sError::Network(err.to_string())
    }
}

/// Read a non-success response into `(status, body)` for error reporting.
pub async fn error_body(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("<no body>"));
    let body = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("no body").to_string()
    } else {
        body
    };
    (status.as_u16(), body)
}

/// Fetch JSON from a URL with a bearer token.
///
/// # Errors
///
/// Returns error on network failure, non-2xx status or JSON parse failure.
pub async fn fetch_json_bearer<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &str,
    timeout: Duration,
) -> Result<T> {
    let response = client
        .get(url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| map_send_error(&e, timeout))?;

    if !response.status().is_success() {
        let (status, body) = error_body(response).await;
        return Err(Yt2sError::SpotifyApi {
            status_code: Some(status),
            message: format!("HTTP {status} from {url}: {body}"),
        });
    }

    response
        .json()
        .await
        .map_err(|e| Yt2sError::ParseResponse(e.to_string()))
}
