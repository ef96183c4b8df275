// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! sepfinder - finds the SEP and baseband firmware of signed iOS builds.
//!
//! This is the binary entry point for the Telegram bot.

mod doctor;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sepfinder - SEP and baseband firmware finder bot.
#[derive(Parser, Debug)]
#[command(name = "sepfinder", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the default locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level regardless of `bot.log_level`.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Run the Telegram bot (default).
    Serve,
    /// Check configuration and connectivity.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => sepfinder_config::load_and_validate_path(path),
        None => sepfinder_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            sepfinder_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config, cli.debug).await,
        Commands::Doctor => doctor::run_doctor(&config, cli.config.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("sepfinder: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["sepfinder"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["sepfinder", "doctor", "--config", "/tmp/s.toml", "--debug"])
                .unwrap();
        assert_eq!(cli.command, Some(Commands::Doctor));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
        assert!(cli.debug);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["sepfinder", "shell"]).is_err());
    }
}
