//! Spotify user profile (`GET /me`).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::http::fetch_json_bearer;
use crate::error::Result;

/// Default Spotify Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Follower summary.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// Profile image.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// The current user's profile, as shown in the account menu.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl UserProfile {
    /// First image, used as the avatar.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Display name, falling back to the user ID.
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}

/// Fetch the profile of the user owning `access_token`.
///
/// # Errors
///
/// Returns a Spotify API error on a non-2xx response, a network error if
/// the API is unreachable, or a parse error on an unexpected body.
pub async fn fetch_profile(
    client: &Client,
    api_url: &str,
    access_token: &str,
    timeout: Duration,
) -> Result<UserProfile> {
    let url = format!("{}/me", api_url.trim_end_matches('/'));
    tracing::debug!(%url, "Fetching user profile");
    fetch_json_bearer(client, &url, access_token, timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_profile() {
        let json = r#"{
            "id": "wizzler",
            "display_name": "JM Wizzler",
            "email": "email@example.com",
            "country": "SE",
            "followers": {"href": null, "total": 3829},
            "images": [{"url": "https://i.scdn.co/image/abc", "height": 300, "width": 300}],
            "product": "premium"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name(), "JM Wizzler");
        assert_eq!(profile.followers.total, 3829);
        assert_eq!(profile.avatar_url(), Some("https://i.scdn.co/image/abc"));
    }

    #[test]
    fn missing_optional_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"id":"u1","images":[]}"#).unwrap();
        assert_eq!(profile.name(), "u1");
        assert!(profile.avatar_url().is_none());
        assert_eq!(profile.followers.total, 0);
    }
}
