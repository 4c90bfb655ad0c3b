//! Terminal detection.

use std::io::IsTerminal;

/// Check if stdout is a TTY.
#[must_use]
pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if stderr is a TTY.
#[must_use]
pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Whether a `TERM` value can render ANSI colors.
#[must_use]
pub fn term_supports_color(term: Option<&str>) -> bool {
    !matches!(term, Some("dumb"))
}

/// Decide whether to color output.
///
/// `no_color` is the already-resolved flag (CLI, `NO_COLOR`, config file).
#[must_use]
pub fn should_use_color(no_color: bool) -> bool {
    !no_color
        && term_supports_color(std::env::var("TERM").ok().as_deref())
        && stdout_is_tty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumb_terminal_has_no_color() {
        assert!(!term_supports_color(Some("dumb")));
        assert!(term_supports_color(Some("xterm-256color")));
        assert!(term_supports_color(None));
    }

    #[test]
    fn no_color_flag_wins() {
        assert!(!should_use_color(true));
    }
}
