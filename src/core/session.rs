//! Token lifecycle: check the stored token, refresh it when it has expired.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::core::oauth::{self, OAuthSettings};
use crate::error::{Result, Yt2sError};
use crate::storage::token_store::{KEY_CODE_VERIFIER, LocalStorage, StoredToken, save_token};

/// Authentication state derived from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    /// No access token stored.
    Missing,
    /// Access token present and not yet expired.
    Valid,
    /// Access token present but expired (or its expiry is unreadable).
    Expired,
}

impl TokenState {
    /// Classify a stored token at `now`.
    #[must_use]
    pub fn of(stored: &StoredToken, now: DateTime<Utc>) -> Self {
        if !stored.is_present() {
            Self::Missing
        } else if stored.is_valid(now) {
            Self::Valid
        } else {
            Self::Expired
        }
    }

    /// Whether a login is in effect.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Return a usable access token, refreshing an expired one if possible.
///
/// Refreshing needs both a stored refresh token and OAuth settings (for the
/// client ID); without them an expired token is reported as such.
///
/// # Errors
///
/// [`Yt2sError::NotAuthenticated`] when nothing is stored,
/// [`Yt2sError::AuthExpired`] when the token expired and cannot be refreshed,
/// or the refresh call's own error.
pub async fn ensure_valid(
    client: &Client,
    settings: Option<&OAuthSettings>,
    storage: &mut LocalStorage,
    now: DateTime<Utc>,
) -> Result<String> {
    let stored = StoredToken::load(storage);

    match TokenState::of(&stored, now) {
        TokenState::Missing => Err(Yt2sError::NotAuthenticated),
        TokenState::Valid => stored.access_token.ok_or(Yt2sError::NotAuthenticated),
        TokenState::Expired => {
            let expires = stored
                .expires
                .clone()
                .unwrap_or_else(|| "unknown".to_string());

            let (Some(settings), Some(refresh_token)) = (
                settings,
                stored.refresh_token.as_deref().filter(|_| stored.can_refresh()),
            ) else {
                tracing::debug!(%expires, "Token expired and cannot be refreshed");
                return Err(Yt2sError::AuthExpired { expires });
            };

            tracing::info!(%expires, "Access token expired, refreshing");
            let token = oauth::refresh(client, settings, refresh_token).await?;
            let renewed = save_token(storage, &token, now)?;
            renewed.access_token.ok_or(Yt2sError::NotAuthenticated)
        }
    }
}

/// Finish a login: trade `code` for tokens using the stored PKCE verifier.
///
/// The verifier is removed once the exchange succeeds; a failed exchange
/// leaves it so a corrected code can still be pasted.
///
/// # Errors
///
/// [`Yt2sError::MissingVerifier`] when no login is pending, or the token
/// endpoint's error.
pub async fn complete_login(
    client: &Client,
    settings: &OAuthSettings,
    storage: &mut LocalStorage,
    code: &str,
    now: DateTime<Utc>,
) -> Result<StoredToken> {
    let verifier = storage
        .get_item(KEY_CODE_VERIFIER)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(Yt2sError::MissingVerifier)?;

    let token = oauth::exchange_code(client, settings, code, &verifier).await?;
    let stored = save_token(storage, &token, now)?;
    storage.remove_item(KEY_CODE_VERIFIER)?;

    tracing::info!(expires = ?stored.expires, "Logged in");
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::oauth::TokenResponse;
    use chrono::Duration;

    fn store_token(storage: &mut LocalStorage, expires_in: u64, refresh: Option<&str>, at: DateTime<Utc>) {
        let token = TokenResponse {
            access_token: "access".to_string(),
            token_type: None,
            scope: None,
            expires_in,
            refresh_token: refresh.map(str::to_string),
        };
        save_token(storage, &token, at).unwrap();
    }

    #[test]
    fn state_classification() {
        let now = Utc::now();
        let mut storage = LocalStorage::in_memory();
        assert_eq!(TokenState::of(&StoredToken::load(&storage), now), TokenState::Missing);

        store_token(&mut storage, 3600, None, now);
        let stored = StoredToken::load(&storage);
        assert_eq!(TokenState::of(&stored, now), TokenState::Valid);
        assert_eq!(
            TokenState::of(&stored, now + Duration::hours(2)),
            TokenState::Expired
        );
    }

    #[tokio::test]
    async fn missing_token_is_not_authenticated() {
        let client = Client::new();
        let mut storage = LocalStorage::in_memory();
        let err = ensure_valid(&client, None, &mut storage, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, Yt2sError::NotAuthenticated));
    }

    #[tokio::test]
    async fn valid_token_is_returned_without_network() {
        let client = Client::new();
        let now = Utc::now();
        let mut storage = LocalStorage::in_memory();
        store_token(&mut storage, 3600, Some("refresh"), now);

        let token = ensure_valid(&client, None, &mut storage, now).await.unwrap();
        assert_eq!(token, "access");
    }

    #[tokio::test]
    async fn expired_without_refresh_token_is_auth_expired() {
        let client = Client::new();
        let then = Utc::now() - Duration::hours(3);
        let mut storage = LocalStorage::in_memory();
        store_token(&mut storage, 3600, None, then);

        let err = ensure_valid(&client, None, &mut storage, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, Yt2sError::AuthExpired { .. }));
    }

    #[tokio::test]
    async fn complete_login_without_verifier_fails_before_network() {
        let client = Client::new();
        let settings = OAuthSettings {
            client_id: "cid".to_string(),
            redirect_url: "http://127.0.0.1:8888/callback".to_string(),
            accounts_url: "http://127.0.0.1:9".to_string(),
            timeout: std::time::Duration::from_secs(1),
        };
        let mut storage = LocalStorage::in_memory();
        let err = complete_login(&client, &settings, &mut storage, "code", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, Yt2sError::MissingVerifier));
    }
}
