//! Spotify OAuth Authorization Code flow with PKCE.
//!
//! Two token endpoint interactions, both form-encoded POSTs:
//! 1. Authorization code exchange (completes a login)
//! 2. Refresh token grant (renews an expired access token)

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::core::http::{error_body, map_send_error};
use crate::error::{Result, Yt2sError};

/// Default accounts service base URL.
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Scopes requested at login.
pub const SCOPES: &str =
    "user-read-private user-read-email playlist-modify-public playlist-modify-private";

/// Settings needed to talk to the accounts service.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub redirect_url: String,
    pub accounts_url: String,
    pub timeout: Duration,
}

impl OAuthSettings {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.accounts_url.trim_end_matches('/'))
    }

    /// Authorize endpoint URL.
    #[must_use]
    pub fn authorize_endpoint(&self) -> String {
        self.endpoint("authorize")
    }

    /// Token endpoint URL.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        self.endpoint("api/token")
    }
}

/// Response from the token endpoint for both exchange and refresh.
///
/// `expires_in` is a delta in seconds from the response time.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: u64,
    /// Omitted by some refresh responses.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error body returned by the accounts service.
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<OAuthErrorBody>(body) {
        Ok(OAuthErrorBody {
            error,
            error_description: Some(description),
        }) => format!("{error}: {description}"),
        Ok(OAuthErrorBody { error, .. }) => error,
        Err(_) => body.to_string(),
    }
}

/// Build the authorize URL the user opens in a browser.
///
/// # Errors
///
/// Returns a config error if the accounts base URL does not parse.
pub fn authorize_url(settings: &OAuthSettings, challenge: &str) -> Result<Url> {
    Url::parse_with_params(
        &settings.authorize_endpoint(),
        &[
            ("response_type", "code"),
            ("client_id", settings.client_id.as_str()),
            ("scope", SCOPES),
            ("code_challenge_method", "S256"),
            ("code_challenge", challenge),
            ("redirect_uri", settings.redirect_url.as_str()),
        ],
    )
    .map_err(|e| Yt2sError::ConfigInvalid {
        key: "accounts_url".to_string(),
        value: settings.accounts_url.clone(),
        message: e.to_string(),
    })
}

/// Exchange an authorization code for tokens.
///
/// The verifier proves this client started the flow that produced `code`.
///
/// # Errors
///
/// Returns [`Yt2sError::TokenExchange`] on a non-2xx response or a malformed
/// body, and a network error if the endpoint is unreachable.
pub async fn exchange_code(
    client: &Client,
    settings: &OAuthSettings,
    code: &str,
    verifier: &str,
) -> Result<TokenResponse> {
    tracing::debug!(endpoint = %settings.token_endpoint(), "Exchanging authorization code");

    let response = client
        .post(settings.token_endpoint())
        .form(&[
            ("client_id", settings.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_url.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await
        .map_err(|e| map_send_error(&e, settings.timeout))?;

    if !response.status().is_success() {
        let (status, body) = error_body(response).await;
        return Err(Yt2sError::TokenExchange {
            status: Some(status),
            message: describe_error_body(&body),
        });
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Yt2sError::TokenExchange {
            status: None,
            message: format!("invalid token response: {e}"),
        })
}

/// Renew an access token with a refresh token.
///
/// # Errors
///
/// Returns [`Yt2sError::TokenRefresh`] on a non-2xx response or a malformed
/// body, and a network error if the endpoint is unreachable.
pub async fn refresh(
    client: &Client,
    settings: &OAuthSettings,
    refresh_token: &str,
) -> Result<TokenResponse> {
    tracing::debug!(endpoint = %settings.token_endpoint(), "Refreshing access token");

    let response = client
        .post(settings.token_endpoint())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", settings.client_id.as_str()),
        ])
        .send()
        .await
        .map_err(|e| map_send_error(&e, settings.timeout))?;

    if !response.status().is_success() {
        let (status, body) = error_body(response).await;
        return Err(Yt2sError::TokenRefresh {
            status: Some(status),
            message: describe_error_body(&body),
        });
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Yt2sError::TokenRefresh {
            status: None,
            message: format!("invalid refresh response: {e}"),
        })
}
