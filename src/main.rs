//! yt2spotify - YouTube to Spotify playlist converter client
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use yt2spotify::cli::{Cli, Commands, OutputOptions};
use yt2spotify::core::logging::{self, LogSettings};
use yt2spotify::core::session::TokenState;
use yt2spotify::error::ExitCode as AppExit;
use yt2spotify::render;
use yt2spotify::storage::{LocalStorage, ResolvedConfig, StoredToken};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_settings = LogSettings::resolve(
        cli.log_level.as_deref(),
        cli.json_output,
        cli.verbose,
        |key| std::env::var(key).ok(),
    );
    logging::init(&log_settings);

    let config = match ResolvedConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            let format = cli.cli_format().unwrap_or_default();
            eprintln!(
                "{}",
                render::error::render_error_full(&e, format, cli.no_color, cli.pretty)
            );
            return ExitCode::from(e.exit_code() as u8);
        }
    };
    let out = OutputOptions::from_config(&config);

    match run(cli, &config, out).await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!(
                "{}",
                render::error::render_error_full(&e, out.format, out.no_color, out.pretty)
            );
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli, config: &ResolvedConfig, out: OutputOptions) -> yt2spotify::Result<AppExit> {
    match cli.command {
        None => {
            print_quickstart(config, out);
            Ok(AppExit::Success)
        }

        Some(Commands::Login(args)) => {
            yt2spotify::cli::login::execute(&args, config, out).await?;
            Ok(AppExit::Success)
        }

        Some(Commands::Callback(args)) => {
            yt2spotify::cli::callback::execute(&args, config, out).await?;
            Ok(AppExit::Success)
        }

        Some(Commands::Account) => {
            yt2spotify::cli::account::execute(config, out).await?;
            Ok(AppExit::Success)
        }

        Some(Commands::Submit(args)) => {
            let delivered = yt2spotify::cli::submit::execute(&args, config, out).await?;
            Ok(if delivered {
                AppExit::Success
            } else {
                AppExit::GeneralError
            })
        }

        Some(Commands::Logout) => {
            yt2spotify::cli::logout::execute(config, out)?;
            Ok(AppExit::Success)
        }

        Some(Commands::Config) => {
            yt2spotify::cli::config::execute(config, out)?;
            Ok(AppExit::Success)
        }
    }
}

/// Print the quickstart shown when no command is given.
fn print_quickstart(config: &ResolvedConfig, out: OutputOptions) {
    let state = LocalStorage::load(&config.storage_path)
        .map(|storage| TokenState::of(&StoredToken::load(&storage), Utc::now()))
        .unwrap_or(TokenState::Missing);
    println!(
        "{}",
        render::human::render_quickstart(state.is_authenticated(), out.no_color)
    );
}
