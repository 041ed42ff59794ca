// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reelbot - a Telegram movie catalog bot.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod history;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reelbot_config::ReelbotConfig;

/// Reelbot - a Telegram movie catalog bot.
#[derive(Parser, Debug)]
#[command(name = "reelbot", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to Telegram and answer messages (the default).
    Serve,
    /// Print an actor's most recent stored exchanges.
    History {
        /// Telegram user id.
        #[arg(long)]
        actor: i64,
        /// How many exchanges to print (at most 10).
        #[arg(long, default_value_t = 10)]
        count: i64,
    },
    /// Load and validate the configuration, then exit.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> ReelbotConfig {
    let loaded = match path {
        Some(path) => reelbot_config::load_and_validate_path(path),
        None => reelbot_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            reelbot_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::History { actor, count } => history::run_history(config, actor, count).await,
        Commands::CheckConfig => {
            println!(
                "reelbot: config ok (catalog.base_url={}, storage.database_path={})",
                config.catalog.base_url, config.storage.database_path
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc answers the epoch/stats interface.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["reelbot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn history_arguments() {
        let cli = Cli::try_parse_from(["reelbot", "history", "--actor", "42", "--count", "3"])
            .unwrap();
        match cli.command {
            Some(Commands::History { actor, count }) => {
                assert_eq!(actor, 42);
                assert_eq!(count, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["reelbot", "check-config", "--config", "/tmp/r.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/r.toml")));
    }
}
