//! Human-readable output using `colored`.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

use crate::core::models::{
    AccountView, ConfigReport, LoginReport, LogoutReport, SubmissionReport, TokenSummary,
};
use crate::core::profile::UserProfile;
use crate::core::session::TokenState;
use crate::util::{describe_expiry, format_count};

/// Apply `style` unless colors are off.
fn paint(text: &str, no_color: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if no_color {
        text.to_string()
    } else {
        style(text).to_string()
    }
}

/// The app banner: "YouTube" in red, "Spotify" in green.
#[must_use]
pub fn banner(no_color: bool) -> String {
    format!(
        "{} 2 {}",
        paint("YouTube", no_color, |s| s.red().bold()),
        paint("Spotify", no_color, |s| s.green().bold())
    )
}

fn row(label: &str, value: &str, no_color: bool) -> String {
    format!("  {}  {value}", paint(&format!("{label:<10}"), no_color, |s| s.dimmed()))
}

fn token_line(token: &TokenSummary, now: DateTime<Utc>, no_color: bool) -> String {
    let expiry = token
        .expires
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| describe_expiry(dt.with_timezone(&Utc), now));

    let state = match token.state {
        TokenState::Valid => paint("valid", no_color, |s| s.green()),
        TokenState::Expired => paint("expired", no_color, |s| s.yellow()),
        TokenState::Missing => paint("none", no_color, |s| s.red()),
    };

    let mut line = state;
    if let Some(expiry) = expiry {
        line.push_str(&format!(", {expiry}"));
    }
    if token.refreshable {
        line.push_str(" (refreshable)");
    }
    line
}

fn profile_lines(profile: &UserProfile, no_color: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "  {} {}",
        paint(profile.name(), no_color, |s| s.bold()),
        paint(&format!("({})", profile.id), no_color, |s| s.dimmed())
    )];
    lines.push(row(
        "Email",
        profile.email.as_deref().unwrap_or("-"),
        no_color,
    ));
    lines.push(row(
        "Followers",
        &format_count(profile.followers.total),
        no_color,
    ));
    lines.push(row(
        "Country",
        profile.country.as_deref().unwrap_or("-"),
        no_color,
    ));
    lines.push(row("Avatar", profile.avatar_url().unwrap_or("-"), no_color));
    lines
}

/// Render the account menu.
#[must_use]
pub fn render_account(view: &AccountView, now: DateTime<Utc>, no_color: bool) -> String {
    let mut lines = vec![banner(no_color), String::new()];
    lines.extend(profile_lines(&view.profile, no_color));
    lines.push(row("Token", &token_line(&view.token, now, no_color), no_color));
    lines.join("\n")
}

/// Render the result of a login.
#[must_use]
pub fn render_login(report: &LoginReport, now: DateTime<Utc>, no_color: bool) -> String {
    let headline = if report.already_logged_in {
        "Already logged in to Spotify."
    } else {
        "Logged in to Spotify."
    };
    let mut lines = vec![paint(headline, no_color, |s| s.green().bold())];

    if let Some(profile) = &report.profile {
        lines.push(row("Account", profile.name(), no_color));
    }
    lines.push(row("Token", &token_line(&report.token, now, no_color), no_color));
    lines.push(String::new());
    lines.push(format!(
        "Next: {}",
        paint("yt2spotify submit <youtube-url>", no_color, |s| s.cyan())
    ));
    lines.join("\n")
}

/// Render the result of a logout.
#[must_use]
pub fn render_logout(report: &LogoutReport, no_color: bool) -> String {
    if report.removed {
        paint("Logged out. Stored Spotify tokens removed.", no_color, |s| {
            s.green()
        })
    } else {
        "Not logged in; nothing to remove.".to_string()
    }
}

/// Render a submission outcome.
#[must_use]
pub fn render_submission(report: &SubmissionReport, no_color: bool) -> String {
    if report.outcome.delivered {
        paint(&report.outcome.message, no_color, |s| s.green())
    } else {
        paint(&report.outcome.message, no_color, |s| s.red().bold())
    }
}

/// Render resolved configuration.
#[must_use]
pub fn render_config(report: &ConfigReport, no_color: bool) -> String {
    let exists = if report.config_exists { "" } else { " (not found)" };
    let mut lines = vec![
        format!("Config file: {}{exists}", report.config_path),
        format!("Storage:     {}", report.storage_path),
        String::new(),
    ];

    let width = report
        .entries
        .iter()
        .map(|e| e.key.len())
        .max()
        .unwrap_or(0);
    for entry in &report.entries {
        let value = entry.value.as_deref().map_or_else(
            || paint("(unset)", no_color, |s| s.yellow()),
            str::to_string,
        );
        lines.push(format!(
            "  {:<width$}  {value}  {}",
            entry.key,
            paint(&format!("[{}]", entry.source), no_color, |s| s.dimmed()),
        ));
    }
    lines.join("\n")
}

/// Render the no-command quickstart.
#[must_use]
pub fn render_quickstart(authenticated: bool, no_color: bool) -> String {
    let cmd = |s: &str| paint(s, no_color, |t| t.cyan());
    let mut lines = vec![
        banner(no_color),
        String::new(),
        "Convert YouTube playlists into Spotify playlists.".to_string(),
        String::new(),
    ];

    if authenticated {
        lines.push(format!("  {}   Convert a YouTube URL", cmd("yt2spotify submit <url>")));
        lines.push(format!("  {}        Show your Spotify account", cmd("yt2spotify account")));
        lines.push(format!("  {}         Forget stored tokens", cmd("yt2spotify logout")));
    } else {
        lines.push("You are not logged in.".to_string());
        lines.push(format!("  {}          Log in with Spotify", cmd("yt2spotify login")));
        lines.push(format!(
            "  {}  Log in by pasting the redirected URL",
            cmd("yt2spotify login --no-listen")
        ));
    }

    lines.push(String::new());
    lines.push(format!("Run {} for all options.", cmd("yt2spotify --help")));
    lines.join("\n")
}
