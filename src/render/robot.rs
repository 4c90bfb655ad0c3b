//! Robot output (JSON and Markdown).

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::models::{
    AccountView, ConfigReport, LoginReport, LogoutReport, RobotOutput, SubmissionReport,
    TokenSummary,
};
use crate::error::Result;
use crate::util::format_count;

/// Render a payload as a JSON envelope.
pub fn render_json<T: Serialize>(command: &str, data: &T, pretty: bool) -> Result<String> {
    let output = RobotOutput::new(command, data);
    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(json)
}

fn token_md(out: &mut String, token: &TokenSummary) {
    let state = serde_json::to_value(token.state)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let _ = writeln!(out, "- token: {state}");
    if let Some(expires) = &token.expires {
        let _ = writeln!(out, "- expires: {expires}");
    }
    let _ = writeln!(out, "- refreshable: {}", token.refreshable);
}

/// Render the account as Markdown.
#[must_use]
pub fn render_account_md(view: &AccountView) -> String {
    let profile = &view.profile;
    let mut out = String::new();
    let _ = writeln!(out, "## {}\n", profile.name());
    let _ = writeln!(out, "- id: {}", profile.id);
    let _ = writeln!(out, "- email: {}", profile.email.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "- followers: {}", format_count(profile.followers.total));
    let _ = writeln!(out, "- country: {}", profile.country.as_deref().unwrap_or("-"));
    if let Some(avatar) = profile.avatar_url() {
        let _ = writeln!(out, "- avatar: ![avatar]({avatar})");
    }
    token_md(&mut out, &view.token);
    out
}

/// Render a login result as Markdown.
#[must_use]
pub fn render_login_md(report: &LoginReport) -> String {
    let mut out = String::from("## Login\n\n");
    let _ = writeln!(out, "- already_logged_in: {}", report.already_logged_in);
    if let Some(profile) = &report.profile {
        let _ = writeln!(out, "- account: {}", profile.name());
    }
    token_md(&mut out, &report.token);
    out
}

/// Render a logout result as Markdown.
#[must_use]
pub fn render_logout_md(report: &LogoutReport) -> String {
    format!("## Logout\n\n- removed: {}\n", report.removed)
}

/// Render a submission outcome as Markdown.
#[must_use]
pub fn render_submission_md(report: &SubmissionReport) -> String {
    let mut out = String::from("## Submission\n\n");
    let _ = writeln!(out, "- youtube_url: {}", report.outcome.youtube_url);
    let _ = writeln!(out, "- delivered: {}", report.outcome.delivered);
    let _ = writeln!(out, "- message: {}", report.outcome.message);
    out
}

/// Render resolved configuration as a Markdown table.
#[must_use]
pub fn render_config_md(report: &ConfigReport) -> String {
    let mut out = String::from("## Configuration\n\n");
    let _ = writeln!(out, "- config_file: {}", report.config_path);
    let _ = writeln!(out, "- storage: {}\n", report.storage_path);
    out.push_str("| Key | Value | Source |\n|-----|-------|--------|\n");
    for entry in &report.entries {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            entry.key,
            entry.value.as_deref().unwrap_or("(unset)"),
            entry.source
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{Followers, UserProfile};
    use crate::core::session::TokenState;

    fn view() -> AccountView {
        AccountView {
            profile: UserProfile {
                id: "wizzler".to_string(),
                display_name: None,
                email: Some("email@example.com".to_string()),
                country: Some("SE".to_string()),
                followers: Followers { total: 12 },
                images: Vec::new(),
            },
            token: TokenSummary {
                state: TokenState::Expired,
                expires: Some("2020-01-01T00:00:00.000Z".to_string()),
                expires_in: Some(3600),
                refreshable: false,
            },
        }
    }

    #[test]
    fn account_json_envelope() {
        let json = render_json("account", &view(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["command"], "account");
        assert_eq!(value["data"]["profile"]["email"], "email@example.com");
        assert_eq!(value["data"]["token"]["state"], "expired");
        assert!(!json.contains('\n'));
    }

    #[test]
    fn pretty_json_is_multiline() {
        let json = render_json("account", &view(), true).unwrap();
        assert!(json.contains('\n'));
    }

    #[test]
    fn account_markdown_falls_back_to_id() {
        let md = render_account_md(&view());
        assert!(md.starts_with("## wizzler"));
        assert!(md.contains("- token: expired"));
        assert!(!md.contains("avatar"));
    }
}
