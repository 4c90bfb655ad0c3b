//! Fix suggestion database for yt2spotify errors.
//!
//! Provides actionable fix suggestions mapped to specific error types,
//! including commands, context explanations, and prevention tips.

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Primary fix commands in order of preference.
    /// These should be copy-paste ready for the terminal.
    pub commands: Vec<String>,

    /// Explanation of why this error occurred.
    pub context: String,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,

    /// Link to documentation for more information.
    pub doc_url: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with required fields.
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
            doc_url: None,
        }
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }

    /// Builder: adds documentation URL.
    #[must_use]
    pub fn with_doc_url(mut self, url: impl Into<String>) -> Self {
        self.doc_url = Some(url.into());
        self
    }
}

const SPOTIFY_AUTH_DOC: &str =
    "https://developer.spotify.com/documentation/web-api/tutorials/code-pkce-flow";

// =============================================================================
// Suggestion Generators
// =============================================================================

/// Suggestions when no token is stored.
#[must_use]
pub fn not_authenticated_suggestions() -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["yt2spotify login".to_string()],
            "No Spotify access token is stored. Log in with Spotify before \
             submitting a YouTube URL.",
        )
        .with_doc_url(SPOTIFY_AUTH_DOC),
    ]
}

/// Suggestions when the access token expired and no refresh token is stored.
#[must_use]
pub fn auth_expired_suggestions(expires: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["yt2spotify login".to_string()],
            format!(
                "The Spotify access token expired at {expires} and no refresh token \
                 is available to renew it."
            ),
        )
        .with_prevention("Access tokens last one hour; refresh tokens renew them automatically."),
    ]
}

/// Suggestions when the user declined the consent screen.
#[must_use]
pub fn authorization_denied_suggestions(reason: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["yt2spotify login".to_string()],
        format!(
            "Spotify returned `{reason}` instead of an authorization code. \
             Approve the requested scopes on the consent screen to continue."
        ),
    )]
}

/// Suggestions for a failed authorization code exchange.
#[must_use]
pub fn token_exchange_suggestions(status: Option<u16>, message: &str) -> Vec<FixSuggestion> {
    let context = match status {
        Some(400) => format!(
            "Spotify rejected the authorization code ({message}). Codes are single-use \
             and expire quickly; the redirect URL and client ID must also match the \
             ones used to start the login."
        ),
        Some(code) => format!("The token endpoint returned HTTP {code}: {message}"),
        None => format!("The token endpoint could not be reached: {message}"),
    };

    vec![
        FixSuggestion::new(vec!["yt2spotify login".to_string()], context)
            .with_doc_url(SPOTIFY_AUTH_DOC),
    ]
}

/// Suggestions for timeouts.
#[must_use]
pub fn timeout_suggestions(seconds: u64) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("yt2spotify --timeout {} <command>", seconds.saturating_mul(2).min(300))],
            format!("The request did not complete within {seconds}s."),
        )
        .with_prevention("Set `timeout_seconds` under [general] in config.toml."),
    ]
}

/// Suggestions for a missing required setting.
#[must_use]
pub fn config_missing_suggestions(key: &str, env: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("export {env}=<value>"), "yt2spotify config".to_string()],
            format!("The setting `{key}` has no value from the CLI, environment or config file."),
        )
        .with_prevention("Store long-lived settings in config.toml."),
    ]
}

/// Suggestions for an invalid setting.
#[must_use]
pub fn config_invalid_suggestions(key: &str, value: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["yt2spotify config".to_string()],
        format!("The value `{value}` for `{key}` is invalid: {message}"),
    )]
}

/// Suggestions for Spotify Web API failures.
#[must_use]
pub fn spotify_api_suggestions(status_code: Option<u16>, message: &str) -> Vec<FixSuggestion> {
    match status_code {
        Some(401) => vec![FixSuggestion::new(
            vec!["yt2spotify login".to_string()],
            "Spotify rejected the access token. It may have been revoked.",
        )],
        Some(403) => vec![FixSuggestion::new(
            vec!["yt2spotify logout".to_string(), "yt2spotify login".to_string()],
            "The token lacks a required scope, or this Spotify account is not \
             registered as a user of the developer application.",
        )],
        Some(429) => vec![FixSuggestion::new(
            vec!["# Wait a moment and retry".to_string()],
            "Spotify rate limited the request.",
        )],
        _ => vec![FixSuggestion::new(
            vec!["yt2spotify -v account".to_string()],
            format!("Spotify API request failed: {message}"),
        )],
    }
}

/// Suggestions for a failed backend submission.
#[must_use]
pub fn submission_failed_suggestions(reason: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["yt2spotify config".to_string(), "yt2spotify -v submit <url>".to_string()],
            format!("The backend did not accept the submission: {reason}"),
        )
        .with_prevention("Check that YT2S_API_URL points at a running backend."),
    ]
}
