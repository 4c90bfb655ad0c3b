//! Logging setup on top of `tracing-subscriber`.
//!
//! Logs go to stderr (or `YT2S_LOG_FILE`) so they never mix with command
//! output. `--json-output` switches to one JSON event per line. Tokens are
//! never logged; call sites record lengths or presence only.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_LEVEL_ENV: &str = "YT2S_LOG";
pub const LOG_FORMAT_ENV: &str = "YT2S_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "YT2S_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs.
    #[default]
    Human,
    /// JSON logs (one event per line).
    Json,
    /// Single line, terse.
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" | "pretty" => Some(Self::Human),
            "json" | "jsonl" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Parse a level name. `verbose` is accepted as an alias for debug.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "verbose" | "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Level,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Level::ERROR,
            format: LogFormat::Human,
            file: None,
        }
    }
}

impl LogSettings {
    /// Resolve from CLI flags, then the environment, then defaults.
    ///
    /// `--verbose` lifts the default level to debug but never lowers an
    /// explicitly chosen one.
    #[must_use]
    pub fn resolve(
        cli_level: Option<&str>,
        json_output: bool,
        verbose: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let explicit = cli_level
            .and_then(parse_level)
            .or_else(|| non_empty(LOG_LEVEL_ENV).as_deref().and_then(parse_level));
        let level = match explicit {
            Some(level) => level,
            None if verbose => Level::DEBUG,
            None => Level::ERROR,
        };

        let format = if json_output {
            LogFormat::Json
        } else {
            non_empty(LOG_FORMAT_ENV)
                .as_deref()
                .and_then(LogFormat::from_arg)
                .unwrap_or_default()
        };

        let file = non_empty(LOG_FILE_ENV).map(|v| PathBuf::from(v.trim()));

        Self {
            level,
            format,
            file,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("yt2spotify={}", self.level.as_str().to_lowercase())))
    }

    fn writer(&self) -> BoxMakeWriter {
        let file = self.file.as_ref().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

        match file {
            Some(file) => BoxMakeWriter::new(std::sync::Mutex::new(file)),
            None => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(settings: &LogSettings) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(settings.filter())
        .with_writer(settings.writer());

    match settings.format {
        LogFormat::Json => builder
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .ok(),
        LogFormat::Compact => builder.compact().with_target(true).try_init().ok(),
        LogFormat::Human => builder
            .with_target(false)
            .without_time()
            .try_init()
            .ok(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_error_human_stderr() {
        let settings = LogSettings::resolve(None, false, false, env_from(&[]));
        assert_eq!(settings, LogSettings::default());
    }

    #[test]
    fn cli_level_beats_env() {
        let settings =
            LogSettings::resolve(Some("trace"), false, false, env_from(&[(LOG_LEVEL_ENV, "warn")]));
        assert_eq!(settings.level, Level::TRACE);
    }

    #[test]
    fn env_level_used_when_cli_absent() {
        let settings = LogSettings::resolve(None, false, false, env_from(&[(LOG_LEVEL_ENV, "warn")]));
        assert_eq!(settings.level, Level::WARN);
    }

    #[test]
    fn verbose_lifts_default_only() {
        assert_eq!(
            LogSettings::resolve(None, false, true, env_from(&[])).level,
            Level::DEBUG
        );
        assert_eq!(
            LogSettings::resolve(Some("error"), false, true, env_from(&[])).level,
            Level::ERROR
        );
    }

    #[test]
    fn json_output_flag_forces_json() {
        let settings = LogSettings::resolve(
            None,
            true,
            false,
            env_from(&[(LOG_FORMAT_ENV, "compact")]),
        );
        assert_eq!(settings.format, LogFormat::Json);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let settings = LogSettings::resolve(
            None,
            false,
            false,
            env_from(&[(LOG_FILE_ENV, "  "), (LOG_FORMAT_ENV, "")]),
        );
        assert!(settings.file.is_none());
        assert_eq!(settings.format, LogFormat::Human);
    }

    #[test]
    fn format_aliases() {
        assert_eq!(LogFormat::from_arg("JSONL"), Some(LogFormat::Json));
        assert_eq!(LogFormat::from_arg("nope"), None);
        assert_eq!(parse_level("verbose"), Some(Level::DEBUG));
    }
}
