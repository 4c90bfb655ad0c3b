//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::callback::DEFAULT_CALLBACK_WAIT;

/// YouTube 2 Spotify - log in with Spotify and submit YouTube URLs for conversion.
#[derive(Parser, Debug)]
#[command(name = "yt2spotify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    // === Connection settings ===
    /// Spotify application client ID
    #[arg(long, value_name = "ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth redirect URL registered for the Spotify application
    #[arg(long, value_name = "URL", global = true)]
    pub redirect_url: Option<String>,

    /// Backend endpoint that accepts submissions
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Format requested on the command line, if any.
    #[must_use]
    pub const fn cli_format(&self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else {
            self.format
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with Spotify (PKCE authorization code flow)
    Login(LoginArgs),

    /// Complete a login with the URL the browser was redirected to
    Callback(CallbackArgs),

    /// Show the logged-in Spotify account
    Account,

    /// Submit a YouTube URL for conversion
    Submit(SubmitArgs),

    /// Forget the stored Spotify tokens
    Logout,

    /// Show resolved configuration and where each value came from
    Config,
}

/// Arguments for the `login` command.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Do not listen on the redirect URL; finish with `yt2spotify callback`
    #[arg(long)]
    pub no_listen: bool,

    /// Seconds to wait for the browser to return to the redirect URL
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CALLBACK_WAIT.as_secs())]
    pub wait: u64,

    /// Start a new login even if a valid token is stored
    #[arg(long)]
    pub force: bool,
}

impl LoginArgs {
    /// Validate argument combinations.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.no_listen && self.wait == 0 {
            return Err(crate::error::Yt2sError::Config(
                "--wait must be greater than 0 seconds".to_string(),
            ));
        }
        Ok(())
    }
}

/// Arguments for the `callback` command.
#[derive(Parser, Debug)]
pub struct CallbackArgs {
    /// Redirected URL, its query string, or the bare authorization code
    #[arg(value_name = "URL_OR_CODE")]
    pub input: String,
}

/// Arguments for the `submit` command.
#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// YouTube URL to convert (prompted for when omitted)
    #[arg(value_name = "YOUTUBE_URL")]
    pub url: Option<String>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// Markdown output
    Md,
}
