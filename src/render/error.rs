//! Error rendering.
//!
//! Human output shows the error, its code and fix suggestions. JSON and
//! Markdown formats get a structured error object for scripts.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::error::{FixSuggestion, Yt2sError};
use crate::util::wrap_text;

// =============================================================================
// Public API
// =============================================================================

/// Render an error for stderr.
#[must_use]
pub fn render_error(error: &Yt2sError, format: OutputFormat, no_color: bool) -> String {
    render_error_full(error, format, no_color, false)
}

/// Render an error with explicit `pretty` control for JSON output.
#[must_use]
pub fn render_error_full(
    error: &Yt2sError,
    format: OutputFormat,
    no_color: bool,
    pretty: bool,
) -> String {
    match format {
        OutputFormat::Json => render_error_json(error, pretty),
        OutputFormat::Md => render_error_json(error, true),
        OutputFormat::Human => {
            if !no_color && crate::util::env::stderr_is_tty() {
                render_rich(error)
            } else {
                render_simple(error)
            }
        }
    }
}

/// Render error as structured JSON.
#[must_use]
pub fn render_error_json(error: &Yt2sError, pretty: bool) -> String {
    let error_json = ErrorJson::from_error(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&error_json)
    } else {
        serde_json::to_string(&error_json)
    };
    rendered.unwrap_or_else(|_| render_simple(error))
}

// =============================================================================
// Colored Rendering
// =============================================================================

fn render_rich(error: &Yt2sError) -> String {
    let suggestions = error.fix_suggestions();
    let mut lines = vec![format!(
        "{} {}",
        error.to_string().red().bold(),
        format!("[{}]", error.error_code()).dimmed()
    )];

    if !suggestions.is_empty() {
        lines.push(String::new());
        lines.push("How to fix:".bold().to_string());
        lines.extend(suggestion_commands(&suggestions).into_iter().map(
            |(prefix, cmd)| format!("{prefix}{}", cmd.cyan()),
        ));
    }

    if let Some(first) = suggestions.first() {
        if !first.context.is_empty() {
            lines.push(String::new());
            lines.push("Why this happened:".yellow().to_string());
            lines.extend(wrap_text(&first.context, 70).into_iter().map(|l| format!("  {l}")));
        }
        if let Some(prevention) = &first.prevention {
            lines.push(String::new());
            lines.push("Prevention:".green().to_string());
            lines.extend(wrap_text(prevention, 70).into_iter().map(|l| format!("  {l}")));
        }
        if let Some(doc_url) = &first.doc_url {
            lines.push(String::new());
            lines.push(format!("{} {}", "Docs:".dimmed(), doc_url.underline()));
        }
    }

    lines.join("\n")
}

fn suggestion_commands(suggestions: &[FixSuggestion]) -> Vec<(String, &str)> {
    let mut out = Vec::new();
    for (i, suggestion) in suggestions.iter().enumerate() {
        for (j, cmd) in suggestion.commands.iter().enumerate() {
            let prefix = if j == 0 {
                format!("  {}. ", i + 1)
            } else {
                "     Or: ".to_string()
            };
            out.push((prefix, cmd.as_str()));
        }
    }
    out
}

// =============================================================================
// Plain Rendering
// =============================================================================

/// Render error as plain text (no ANSI codes).
fn render_simple(error: &Yt2sError) -> String {
    let mut lines = vec![format!("Error [{}]: {error}", error.error_code())];

    let fix = error
        .fix_suggestions()
        .into_iter()
        .flat_map(|s| s.commands)
        .find(|cmd| !cmd.starts_with('#'));
    if let Some(cmd) = fix {
        lines.push(format!("Fix: {cmd}"));
    }

    lines.join("\n")
}

// =============================================================================
// JSON Rendering
// =============================================================================

#[derive(serde::Serialize)]
struct ErrorJson {
    error_code: String,
    category: String,
    message: String,
    exit_code: u8,
    is_retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    suggestions: Vec<SuggestionJson>,
}

#[derive(serde::Serialize)]
struct SuggestionJson {
    commands: Vec<String>,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_url: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &Yt2sError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            category: error.category().to_string(),
            message: error.to_string(),
            exit_code: error.exit_code() as u8,
            is_retryable: error.is_retryable(),
            status_code: error.status_code(),
            suggestions: error
                .fix_suggestions()
                .into_iter()
                .map(|s| SuggestionJson {
                    commands: s.commands,
                    context: s.context,
                    prevention: s.prevention,
                    doc_url: s.doc_url,
                })
                .collect(),
        }
    }
}
