//! Shared helpers for unit and integration tests.
//!
//! ```rust,ignore
//! use yt2spotify::test_utils::*;
//!
//! let dir = TestDir::new();
//! let storage = dir.storage_with_token(3600, Some("refresh"));
//! let profile = make_test_profile_json();
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::oauth::{OAuthSettings, TokenResponse};
use crate::storage::token_store::{LocalStorage, save_token};

// =============================================================================
// Test Data Factories
// =============================================================================

/// A token endpoint response lasting `expires_in` seconds.
#[must_use]
pub fn make_test_token_response(expires_in: u64, refresh_token: Option<&str>) -> TokenResponse {
    TokenResponse {
        access_token: "BQDtestaccesstoken".to_string(),
        token_type: Some("Bearer".to_string()),
        scope: Some(crate::core::oauth::SCOPES.to_string()),
        expires_in,
        refresh_token: refresh_token.map(str::to_string),
    }
}

/// Token endpoint JSON body, as Spotify sends it.
#[must_use]
pub fn make_test_token_json(access_token: &str, refresh_token: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "scope": crate::core::oauth::SCOPES,
        "expires_in": 3600,
    });
    if let Some(refresh) = refresh_token {
        body["refresh_token"] = serde_json::Value::String(refresh.to_string());
    }
    body
}

/// `GET /me` JSON body.
#[must_use]
pub fn make_test_profile_json() -> serde_json::Value {
    serde_json::json!({
        "id": "wizzler",
        "display_name": "JM Wizzler",
        "email": "email@example.com",
        "country": "SE",
        "followers": {"href": null, "total": 3829},
        "images": [{"url": "https://i.scdn.co/image/ab67", "height": 300, "width": 300}],
        "product": "premium",
        "type": "user"
    })
}

/// OAuth settings pointing at a mock accounts service.
#[must_use]
pub fn make_test_settings(accounts_url: &str) -> OAuthSettings {
    OAuthSettings {
        client_id: "test-client-id".to_string(),
        redirect_url: "http://127.0.0.1:8888/callback".to_string(),
        accounts_url: accounts_url.to_string(),
        timeout: Duration::from_secs(5),
    }
}

/// Config file content with every section filled in.
#[must_use]
pub fn make_test_config_toml(backend_url: &str) -> String {
    format!(
        r#"[general]
timeout_seconds = 10

[spotify]
client_id = "test-client-id"
redirect_url = "http://127.0.0.1:8888/callback"

[backend]
url = "{backend_url}"

[output]
format = "human"
color = false
"#
    )
}

// =============================================================================
// Temporary Directory
// =============================================================================

/// An isolated temporary directory, removed on drop.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Full path of `name` inside the directory.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }

    /// Write `content` to `name`, creating parents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.file_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Path used for the token storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.file_path("storage.json")
    }

    /// Storage holding a token issued at `issued_at`.
    ///
    /// # Panics
    ///
    /// Panics if storage cannot be written.
    pub fn storage_with_token_at(
        &self,
        expires_in: u64,
        refresh_token: Option<&str>,
        issued_at: DateTime<Utc>,
    ) -> LocalStorage {
        let mut storage = LocalStorage::load(&self.storage_path()).expect("load storage");
        save_token(
            &mut storage,
            &make_test_token_response(expires_in, refresh_token),
            issued_at,
        )
        .expect("save token");
        storage
    }

    /// Storage holding a token issued now.
    ///
    /// # Panics
    ///
    /// Panics if storage cannot be written.
    pub fn storage_with_token(&self, expires_in: u64, refresh_token: Option<&str>) -> LocalStorage {
        self.storage_with_token_at(expires_in, refresh_token, Utc::now())
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = &$haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{}",
            needle,
            haystack
        );
    };
}

/// Assert that a string does NOT contain a substring.
#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = &$haystack;
        let needle = $needle;
        assert!(
            !haystack.contains(needle),
            "Expected string NOT to contain {:?}\n\nActual string:\n{}",
            needle,
            haystack
        );
    };
}

// =============================================================================
// Helpers
// =============================================================================

/// Whether `text` contains an ANSI escape.
#[must_use]
pub fn has_ansi_codes(text: &str) -> bool {
    text.contains('\x1b')
}

/// Remove CSI escape sequences.
#[must_use]
pub fn strip_ansi_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // ESC [ params final-byte
            if chars.next() == Some('[') {
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
