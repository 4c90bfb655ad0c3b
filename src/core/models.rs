//! Output models shared by the renderers.
//!
//! Robot output wraps every payload in [`RobotOutput`] so consumers can
//! dispatch on `command` and check `schema_version`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::profile::UserProfile;
use crate::core::session::TokenState;
use crate::core::submit::SubmissionOutcome;
use crate::storage::token_store::StoredToken;

/// Schema identifier for robot output.
pub const SCHEMA_VERSION: &str = "yt2spotify.v1";

/// Envelope for JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotOutput<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub data: T,
    pub errors: Vec<String>,
}

impl<T> RobotOutput<T> {
    /// Create a new robot output envelope.
    pub fn new(command: impl Into<String>, data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            command: command.into(),
            data,
            errors: Vec::new(),
        }
    }

    /// Create with errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Token status without the secrets.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenSummary {
    pub state: TokenState,
    pub expires: Option<String>,
    pub expires_in: Option<u64>,
    pub refreshable: bool,
}

impl TokenSummary {
    /// Summarize what is stored at `now`.
    #[must_use]
    pub fn of(stored: &StoredToken, now: DateTime<Utc>) -> Self {
        Self {
            state: TokenState::of(stored, now),
            expires: stored.expires.clone(),
            expires_in: stored.expires_in.as_deref().and_then(|v| v.parse().ok()),
            refreshable: stored.can_refresh(),
        }
    }
}

/// What the account command shows.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub profile: UserProfile,
    pub token: TokenSummary,
}

/// Result of a login attempt.
#[derive(Debug, Clone, Serialize)]
pub struct LoginReport {
    /// True when a valid token was already stored and no flow ran.
    pub already_logged_in: bool,
    pub token: TokenSummary,
    /// Profile fetched after login, if the API answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

/// Result of a logout.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutReport {
    /// Whether a token was stored before.
    pub removed: bool,
    pub storage_path: Option<String>,
}

/// Result of a submission, as rendered.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    #[serde(flatten)]
    pub outcome: SubmissionOutcome,
    pub backend_url: String,
}

/// One resolved configuration value.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
    pub source: String,
}

/// Resolved configuration as shown by the config command.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub config_path: String,
    pub config_exists: bool,
    pub storage_path: String,
    pub entries: Vec<ConfigEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_fields_are_camel_case() {
        let output = RobotOutput::new("logout", LogoutReport {
            removed: true,
            storage_path: None,
        });
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(json["command"], "logout");
        assert_eq!(json["data"]["removed"], true);
        assert!(json["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn token_summary_never_carries_tokens() {
        let stored = StoredToken {
            access_token: Some("secret-access".to_string()),
            refresh_token: Some("secret-refresh".to_string()),
            expires_in: Some("3600".to_string()),
            expires: Some("2030-01-01T00:00:00.000Z".to_string()),
        };
        let summary = TokenSummary::of(&stored, Utc::now());
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("secret"));
        assert_eq!(summary.state, TokenState::Valid);
        assert_eq!(summary.expires_in, Some(3600));
        assert!(summary.refreshable);
    }

    #[test]
    fn submission_report_flattens_outcome() {
        let report = SubmissionReport {
            outcome: SubmissionOutcome {
                delivered: true,
                message: "Playlist created".to_string(),
                youtube_url: "https://youtu.be/x".to_string(),
            },
            backend_url: "http://localhost:8000/convert_playlist".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["message"], "Playlist created");
        assert_eq!(json["delivered"], true);
    }
}
