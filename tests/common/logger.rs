//! Structured test logging.
#![allow(dead_code)]
//!
//! ```rust,ignore
//! let log = TestLogger::new("submit_posts_once");
//! log.phase("setup");
//! log.http_request("POST", &url);
//! log.phase("verify");
//! log.finish_ok();
//! ```
//!
//! - `TEST_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//! - `TEST_LOG_JSON`: "1" or "true" for one JSON object per line

use std::cell::RefCell;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn from_env() -> Self {
        match std::env::var("TEST_LOG_LEVEL")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    level: LogLevel,
    test: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<&'a str>,
    elapsed_ms: u128,
}

/// Per-test logger that tracks phases and elapsed time.
pub struct TestLogger {
    name: String,
    started: Instant,
    phase: RefCell<Option<String>>,
    min_level: LogLevel,
    json: bool,
}

impl TestLogger {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let json = std::env::var("TEST_LOG_JSON")
            .is_ok_and(|v| matches!(v.to_lowercase().as_str(), "1" | "true"));
        let logger = Self {
            name: name.to_string(),
            started: Instant::now(),
            phase: RefCell::new(None),
            min_level: LogLevel::from_env(),
            json,
        };
        logger.log(LogLevel::Debug, "start");
        logger
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        let phase = self.phase.borrow();
        let elapsed_ms = self.started.elapsed().as_millis();

        if self.json {
            let entry = LogEntry {
                timestamp: Utc::now().to_rfc3339(),
                level,
                test: &self.name,
                message,
                phase: phase.as_deref(),
                elapsed_ms,
            };
            if let Ok(line) = serde_json::to_string(&entry) {
                eprintln!("{line}");
            }
        } else {
            let phase = phase.as_deref().map(|p| format!("[{p}] ")).unwrap_or_default();
            eprintln!("{level:?} {} {phase}{message} (+{elapsed_ms}ms)", self.name);
        }
    }

    pub fn phase(&self, name: &str) {
        *self.phase.borrow_mut() = Some(name.to_string());
        self.log(LogLevel::Debug, "phase");
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn http_request(&self, method: &str, url: &str) {
        self.log(LogLevel::Debug, &format!("{method} {url}"));
    }

    pub fn finish_ok(self) {
        self.log(LogLevel::Info, "PASS");
    }

    pub fn finish_err(self, reason: &str) {
        self.log(LogLevel::Error, &format!("FAIL: {reason}"));
    }
}
