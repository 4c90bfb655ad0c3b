//! Error types for yt2spotify.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into five categories:
//! - **Authentication**: login state, PKCE verifier, token exchange and refresh
//! - **Network**: connection failures and timeouts
//! - **Configuration**: missing or invalid settings and user input
//! - **Service**: Spotify Web API and backend responses
//! - **Internal**: I/O, serialization, unclassified
//!
//! Each error has a stable error code (e.g., `YT2S-A001`) for programmatic handling
//! and can provide actionable fix suggestions via [`Yt2sError::fix_suggestions()`].

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

/// Fixed user-facing message for a failed submission.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to upload to YouTube.";

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Login state, verifier, token exchange or refresh.
    Authentication,
    /// Connection failures and timeouts.
    Network,
    /// Missing or invalid settings and user input.
    Configuration,
    /// Spotify Web API or backend responses.
    Service,
    /// Bugs, I/O, unclassified.
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication error",
            Self::Network => "Network error",
            Self::Configuration => "Configuration error",
            Self::Service => "Service error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Authentication => "A",
            Self::Network => "N",
            Self::Configuration => "C",
            Self::Service => "S",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure, including a failed submission
    GeneralError = 1,
    /// No usable token; run `yt2spotify login`
    NotAuthenticated = 2,
    /// Missing or invalid configuration or input
    ConfigError = 3,
    /// Timeout
    Timeout = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for yt2spotify operations.
#[derive(Error, Debug)]
pub enum Yt2sError {
    // ==========================================================================
    // Authentication errors
    // ==========================================================================
    /// No access token is stored.
    #[error("not logged in to Spotify")]
    NotAuthenticated,

    /// The stored access token has expired and cannot be refreshed.
    #[error("Spotify session expired at {expires}")]
    AuthExpired { expires: String },

    /// The authorization server redirected back with an `error` parameter.
    #[error("Spotify authorization was denied: {reason}")]
    AuthorizationDenied { reason: String },

    /// The callback arrived but no PKCE verifier was stored.
    #[error("no PKCE code verifier stored; start with `yt2spotify login`")]
    MissingVerifier,

    /// Authorization code exchange failed.
    #[error("token exchange failed: {message}")]
    TokenExchange {
        status: Option<u16>,
        message: String,
    },

    /// Refresh token grant failed.
    #[error("token refresh failed: {message}")]
    TokenRefresh {
        status: Option<u16>,
        message: String,
    },

    // ==========================================================================
    // Network errors
    // ==========================================================================
    /// Request timed out.
    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    /// No authorization callback arrived on the loopback listener in time.
    #[error("no authorization callback received within {0} seconds")]
    CallbackTimeout(u64),

    /// Generic network error.
    #[error("network error: {0}")]
    Network(String),

    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// A required setting has no value from any source.
    #[error("missing required setting '{key}' (set {env} or add it to config.toml)")]
    ConfigMissing { key: String, env: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid {
        key: String,
        value: String,
        message: String,
    },

    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Pasted callback URL or code could not be understood.
    #[error("invalid authorization callback: {0}")]
    InvalidCallback(String),

    /// The video URL given to `submit` is unusable.
    #[error("invalid YouTube URL: {0}")]
    InvalidVideoUrl(String),

    // ==========================================================================
    // Service errors
    // ==========================================================================
    /// Spotify Web API returned an error.
    #[error("Spotify API error: {message}")]
    SpotifyApi {
        status_code: Option<u16>,
        message: String,
    },

    /// Backend submission failed. Displays the fixed user-facing message.
    #[error("Failed to upload to YouTube.")]
    SubmissionFailed { reason: String },

    /// Failed to parse a response body.
    #[error("failed to parse response: {0}")]
    ParseResponse(String),

    // ==========================================================================
    // Internal errors
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Yt2sError {
    /// Map error to process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotAuthenticated | Self::AuthExpired { .. } | Self::MissingVerifier => {
                ExitCode::NotAuthenticated
            }

            Self::ConfigMissing { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_)
            | Self::InvalidCallback(_)
            | Self::InvalidVideoUrl(_)
            | Self::ParseResponse(_) => ExitCode::ConfigError,

            Self::Timeout(_) | Self::CallbackTimeout(_) => ExitCode::Timeout,

            Self::AuthorizationDenied { .. }
            | Self::TokenExchange { .. }
            | Self::TokenRefresh { .. }
            | Self::Network(_)
            | Self::SpotifyApi { .. }
            | Self::SubmissionFailed { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotAuthenticated
            | Self::AuthExpired { .. }
            | Self::AuthorizationDenied { .. }
            | Self::MissingVerifier
            | Self::TokenExchange { .. }
            | Self::TokenRefresh { .. } => ErrorCategory::Authentication,

            Self::Timeout(_) | Self::CallbackTimeout(_) | Self::Network(_) => {
                ErrorCategory::Network
            }

            Self::ConfigMissing { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_)
            | Self::InvalidCallback(_)
            | Self::InvalidVideoUrl(_) => ErrorCategory::Configuration,

            Self::SpotifyApi { .. } | Self::SubmissionFailed { .. } | Self::ParseResponse(_) => {
                ErrorCategory::Service
            }

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `YT2S-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "YT2S-A001",
            Self::AuthExpired { .. } => "YT2S-A002",
            Self::AuthorizationDenied { .. } => "YT2S-A003",
            Self::MissingVerifier => "YT2S-A004",
            Self::TokenExchange { .. } => "YT2S-A010",
            Self::TokenRefresh { .. } => "YT2S-A011",

            Self::Timeout(_) => "YT2S-N001",
            Self::CallbackTimeout(_) => "YT2S-N002",
            Self::Network(_) => "YT2S-N099",

            Self::ConfigMissing { .. } => "YT2S-C001",
            Self::ConfigInvalid { .. } => "YT2S-C002",
            Self::Config(_) => "YT2S-C003",
            Self::InvalidCallback(_) => "YT2S-C010",
            Self::InvalidVideoUrl(_) => "YT2S-C011",

            Self::SpotifyApi { .. } => "YT2S-S001",
            Self::SubmissionFailed { .. } => "YT2S-S010",
            Self::ParseResponse(_) => "YT2S-S020",

            Self::Io(_) => "YT2S-X001",
            Self::Json(_) => "YT2S-X002",
            Self::Other(_) => "YT2S-X099",
        }
    }

    /// Returns whether the error is potentially recoverable by retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::CallbackTimeout(_) | Self::Network(_)
        )
    }

    /// Returns the HTTP status code carried by the error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::TokenExchange { status, .. } | Self::TokenRefresh { status, .. } => *status,
            Self::SpotifyApi { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Returns actionable fix suggestions for this error.
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::NotAuthenticated => suggestions::not_authenticated_suggestions(),
            Self::AuthExpired { expires } => suggestions::auth_expired_suggestions(expires),
            Self::AuthorizationDenied { reason } => {
                suggestions::authorization_denied_suggestions(reason)
            }
            Self::MissingVerifier => vec![FixSuggestion::new(
                vec!["yt2spotify login".to_string()],
                "The callback can only be completed in the session that started the login, \
                 because the PKCE verifier is written when the authorize URL is generated.",
            )],
            Self::TokenExchange { status, message } => {
                suggestions::token_exchange_suggestions(*status, message)
            }
            Self::TokenRefresh { .. } => vec![
                FixSuggestion::new(
                    vec!["yt2spotify logout".to_string(), "yt2spotify login".to_string()],
                    "The refresh token was rejected. It may have been revoked from the \
                     Spotify account page.",
                ),
            ],

            Self::Timeout(seconds) => suggestions::timeout_suggestions(*seconds),
            Self::CallbackTimeout(seconds) => vec![
                FixSuggestion::new(
                    vec![
                        "yt2spotify login --no-listen".to_string(),
                        "yt2spotify callback '<redirected URL>'".to_string(),
                    ],
                    format!(
                        "The browser did not return to the redirect URL within {seconds}s. \
                         Paste the redirected URL manually instead."
                    ),
                ),
            ],
            Self::Network(msg) => vec![FixSuggestion::new(
                vec!["# Check your internet connection".to_string()],
                format!("Network error: {msg}."),
            )],

            Self::ConfigMissing { key, env } => suggestions::config_missing_suggestions(key, env),
            Self::ConfigInvalid { key, value, message } => {
                suggestions::config_invalid_suggestions(key, value, message)
            }
            Self::Config(msg) => vec![FixSuggestion::new(
                vec!["yt2spotify config".to_string()],
                format!("Configuration error: {msg}"),
            )],
            Self::InvalidCallback(msg) => vec![FixSuggestion::new(
                vec!["yt2spotify callback 'http://127.0.0.1:8888/callback?code=...'".to_string()],
                format!(
                    "{msg}. Paste the full URL the browser was redirected to, or just the \
                     value of its `code` parameter."
                ),
            )],
            Self::InvalidVideoUrl(msg) => vec![FixSuggestion::new(
                vec!["yt2spotify submit 'https://www.youtube.com/playlist?list=...'".to_string()],
                format!("{msg}."),
            )],

            Self::SpotifyApi { status_code, message } => {
                suggestions::spotify_api_suggestions(*status_code, message)
            }
            Self::SubmissionFailed { reason } => suggestions::submission_failed_suggestions(reason),
            Self::ParseResponse(msg) => vec![FixSuggestion::new(
                vec!["yt2spotify -v <command>".to_string()],
                format!("Unexpected response body: {msg}."),
            )],

            Self::Io(err) => vec![FixSuggestion::new(
                vec!["# Check file permissions and disk space".to_string()],
                format!("I/O error: {err}."),
            )],
            Self::Json(err) => vec![FixSuggestion::new(
                vec!["yt2spotify logout".to_string()],
                format!("JSON error: {err}. The storage file may be corrupted."),
            )],
            Self::Other(err) => vec![FixSuggestion::new(
                vec!["yt2spotify -v <command>".to_string()],
                format!("Unexpected error: {err}. Please report this issue."),
            )],
        }
    }
}

/// Result type alias for yt2spotify operations.
pub type Result<T> = std::result::Result<T, Yt2sError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_variants() -> Vec<Yt2sError> {
        vec![
            Yt2sError::NotAuthenticated,
            Yt2sError::AuthExpired {
                expires: "2026-01-01T00:00:00Z".to_string(),
            },
            Yt2sError::AuthorizationDenied {
                reason: "access_denied".to_string(),
            },
            Yt2sError::MissingVerifier,
            Yt2sError::TokenExchange {
                status: Some(400),
                message: "invalid_grant".to_string(),
            },
            Yt2sError::TokenRefresh {
                status: Some(400),
                message: "invalid_grant".to_string(),
            },
            Yt2sError::Timeout(30),
            Yt2sError::CallbackTimeout(300),
            Yt2sError::Network("connection reset".to_string()),
            Yt2sError::ConfigMissing {
                key: "client_id".to_string(),
                env: "YT2S_SPOTIFY_CLIENT_ID".to_string(),
            },
            Yt2sError::ConfigInvalid {
                key: "timeout_seconds".to_string(),
                value: "0".to_string(),
                message: "out of range".to_string(),
            },
            Yt2sError::Config("bad".to_string()),
            Yt2sError::InvalidCallback("no code".to_string()),
            Yt2sError::InvalidVideoUrl("empty".to_string()),
            Yt2sError::SpotifyApi {
                status_code: Some(401),
                message: "expired".to_string(),
            },
            Yt2sError::SubmissionFailed {
                reason: "HTTP 500".to_string(),
            },
            Yt2sError::ParseResponse("eof".to_string()),
            Yt2sError::Io(std::io::Error::other("disk")),
            Yt2sError::Other(anyhow::anyhow!("boom")),
        ]
    }

    #[test]
    fn error_category_display() {
        assert_eq!(
            ErrorCategory::Authentication.to_string(),
            "Authentication error"
        );
        assert_eq!(ErrorCategory::Service.code_prefix(), "S");
    }

    #[test]
    fn error_codes_follow_format() {
        for err in all_variants() {
            let code = err.error_code();
            assert!(code.starts_with("YT2S-"), "bad code {code}");
            let prefix = err.category().code_prefix();
            assert_eq!(&code[5..6], prefix, "code {code} does not match category");
        }
    }

    #[test]
    fn error_codes_are_unique() {
        let codes: Vec<_> = all_variants().iter().map(Yt2sError::error_code).collect();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len());
    }

    #[test]
    fn all_error_variants_have_suggestions() {
        for err in all_variants() {
            assert!(
                !err.fix_suggestions().is_empty(),
                "{} has no suggestions",
                err.error_code()
            );
        }
    }

    #[test]
    fn exit_codes_are_correct() {
        assert_eq!(
            Yt2sError::NotAuthenticated.exit_code(),
            ExitCode::NotAuthenticated
        );
        assert_eq!(Yt2sError::Timeout(5).exit_code(), ExitCode::Timeout);
        assert_eq!(
            Yt2sError::InvalidVideoUrl(String::new()).exit_code(),
            ExitCode::ConfigError
        );
        assert_eq!(
            Yt2sError::SubmissionFailed {
                reason: String::new()
            }
            .exit_code(),
            ExitCode::GeneralError
        );
        assert_eq!(i32::from(ExitCode::NotAuthenticated), 2);
    }

    #[test]
    fn submission_failure_displays_fixed_message() {
        let err = Yt2sError::SubmissionFailed {
            reason: "HTTP 502 Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), SUBMISSION_FAILED_MESSAGE);
    }

    #[test]
    fn retryable_errors() {
        assert!(Yt2sError::Timeout(1).is_retryable());
        assert!(Yt2sError::Network("x".to_string()).is_retryable());
        assert!(!Yt2sError::NotAuthenticated.is_retryable());
    }

    #[test]
    fn status_code_extraction() {
        let err = Yt2sError::SpotifyApi {
            status_code: Some(403),
            message: "forbidden".to_string(),
        };
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(Yt2sError::MissingVerifier.status_code(), None);
    }
}
