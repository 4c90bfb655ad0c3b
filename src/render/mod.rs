//! Output rendering for human and robot modes.

pub mod error;
pub mod human;
pub mod progress;
pub mod robot;

use chrono::{DateTime, Utc};

use crate::cli::args::OutputFormat;
use crate::core::models::{AccountView, ConfigReport, LoginReport, LogoutReport, SubmissionReport};
use crate::error::Result;

/// Render the account menu.
pub fn render_account(
    view: &AccountView,
    now: DateTime<Utc>,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_account(view, now, no_color)),
        OutputFormat::Json => robot::render_json("account", view, pretty),
        OutputFormat::Md => Ok(robot::render_account_md(view)),
    }
}

/// Render a login result.
pub fn render_login(
    report: &LoginReport,
    now: DateTime<Utc>,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_login(report, now, no_color)),
        OutputFormat::Json => robot::render_json("login", report, pretty),
        OutputFormat::Md => Ok(robot::render_login_md(report)),
    }
}

/// Render a logout result.
pub fn render_logout(
    report: &LogoutReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_logout(report, no_color)),
        OutputFormat::Json => robot::render_json("logout", report, pretty),
        OutputFormat::Md => Ok(robot::render_logout_md(report)),
    }
}

/// Render a submission outcome.
pub fn render_submission(
    report: &SubmissionReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_submission(report, no_color)),
        OutputFormat::Json => robot::render_json("submit", report, pretty),
        OutputFormat::Md => Ok(robot::render_submission_md(report)),
    }
}

/// Render resolved configuration.
pub fn render_config(
    report: &ConfigReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_config(report, no_color)),
        OutputFormat::Json => robot::render_json("config", report, pretty),
        OutputFormat::Md => Ok(robot::render_config_md(report)),
    }
}
