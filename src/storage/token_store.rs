//! Token record persistence.
//!
//! The token record lives in a flat string-to-string key/value store, one
//! entry per field, the same shape a browser's local storage would hold.
//! Entries are written independently; there is no atomicity across them and
//! no schema version.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;

use crate::core::oauth::TokenResponse;
use crate::error::{Result, Yt2sError};

/// Storage key for the access token.
pub const KEY_ACCESS_TOKEN: &str = "access_token";
/// Storage key for the refresh token.
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
/// Storage key for the expiry duration in seconds.
pub const KEY_EXPIRES_IN: &str = "expires_in";
/// Storage key for the absolute expiry timestamp (RFC 3339).
pub const KEY_EXPIRES: &str = "expires";
/// Storage key for the PKCE code verifier.
pub const KEY_CODE_VERIFIER: &str = "code_verifier";

/// File-backed string key/value storage.
#[derive(Debug, Default)]
pub struct LocalStorage {
    items: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl LocalStorage {
    /// Load from file, or start empty if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not a JSON
    /// object of strings.
    pub fn load(path: &Path) -> Result<Self> {
        let items = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!(?path, "Storage file not found, starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            items,
            path: Some(path.to_path_buf()),
        })
    }

    /// Storage that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Read one entry.
    #[must_use]
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Write one entry and persist.
    ///
    /// # Errors
    /// Returns an error if the storage file cannot be written.
    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.items.insert(key.to_string(), value.into());
        self.persist()
    }

    /// Remove one entry and persist. Removing a missing key is a no-op.
    ///
    /// # Errors
    /// Returns an error if the storage file cannot be written.
    pub fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.items)?;
        fs::write(path, content)?;
        restrict_permissions(path)?;
        tracing::trace!(?path, entries = self.items.len(), "Storage persisted");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// The token record as read back from storage.
///
/// Every field is optional because entries are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoredToken {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<String>,
    pub expires: Option<String>,
}

impl StoredToken {
    /// Read the four token entries.
    #[must_use]
    pub fn load(storage: &LocalStorage) -> Self {
        let read = |key: &str| storage.get_item(key).map(str::to_string);
        Self {
            access_token: read(KEY_ACCESS_TOKEN),
            refresh_token: read(KEY_REFRESH_TOKEN),
            expires_in: read(KEY_EXPIRES_IN),
            expires: read(KEY_EXPIRES),
        }
    }

    /// Parsed absolute expiry.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// An access token is present and its expiry lies strictly after `now`.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
            && self.expires_at().is_some_and(|expires| expires > now)
    }

    /// Whether a non-empty refresh token is stored.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether any token entry exists at all.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Overwrite the token record with a fresh token response.
///
/// `expires` is computed here as `now + expires_in`. A response without a
/// refresh token keeps the stored one.
///
/// # Errors
/// Returns an error if storage cannot be written, or
/// [`Yt2sError::ParseResponse`] if `expires_in` cannot be added to `now`.
/// Nothing is written in that case.
pub fn save_token(
    storage: &mut LocalStorage,
    token: &TokenResponse,
    now: DateTime<Utc>,
) -> Result<StoredToken> {
    let expires = i64::try_from(token.expires_in)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            Yt2sError::ParseResponse(format!("expires_in out of range: {}", token.expires_in))
        })?;
    let expires = expires.to_rfc3339_opts(SecondsFormat::Millis, true);

    storage.set_item(KEY_ACCESS_TOKEN, token.access_token.clone())?;
    if let Some(refresh) = &token.refresh_token {
        storage.set_item(KEY_REFRESH_TOKEN, refresh.clone())?;
    }
    storage.set_item(KEY_EXPIRES_IN, token.expires_in.to_string())?;
    storage.set_item(KEY_EXPIRES, expires)?;

    tracing::debug!(
        expires_in = token.expires_in,
        has_refresh = token.refresh_token.is_some(),
        "Token saved"
    );
    Ok(StoredToken::load(storage))
}

/// Remove the token record and any pending PKCE verifier.
///
/// # Errors
/// Returns an error if storage cannot be written.
pub fn clear_token(storage: &mut LocalStorage) -> Result<()> {
    for key in [
        KEY_ACCESS_TOKEN,
        KEY_REFRESH_TOKEN,
        KEY_EXPIRES_IN,
        KEY_EXPIRES,
        KEY_CODE_VERIFIER,
    ] {
        storage.remove_item(key)?;
    }
    Ok(())
}
