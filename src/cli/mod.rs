//! CLI argument parsing and command dispatch.

pub mod account;
pub mod args;
pub mod callback;
pub mod config;
pub mod login;
pub mod logout;
pub mod submit;

use std::io::{BufRead, Write};

pub use args::{Cli, Commands, OutputFormat};

use crate::error::Result;
use crate::storage::ResolvedConfig;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub no_color: bool,
}

impl OutputOptions {
    /// Derive from resolved configuration and the terminal.
    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let no_color = !crate::util::env::should_use_color(config.no_color.value);
        Self {
            format: config.format.value,
            pretty: config.pretty.value,
            no_color,
        }
    }

    /// Whether progress and prompts may be drawn on stderr.
    #[must_use]
    pub fn interactive(&self) -> bool {
        self.format == OutputFormat::Human && crate::util::env::stderr_is_tty()
    }
}

/// Print `prompt` on stderr and read one line from stdin.
///
/// Returns an empty string at end of input.
///
/// # Errors
///
/// Returns an I/O error if stdin cannot be read.
pub fn read_line(prompt: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
