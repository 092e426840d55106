// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leetboard - a Telegram bot tracking first-time LeetCode solves.
//!
//! This is the binary entry point.

mod serve;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Leetboard - track group members' LeetCode solves and post leaderboards.
#[derive(Parser, Debug)]
#[command(name = "leetboard", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot: poller, weekly report, and command handling.
    Serve,
    /// Load and validate configuration, then print a summary.
    Config,
}

fn load_config(cli: &Cli) -> leetboard_config::LeetboardConfig {
    let result = match &cli.config {
        Some(path) => leetboard_config::load_config_from_path(path)
            .map_err(leetboard_config::diagnostic::figment_to_config_errors)
            .and_then(|config| {
                leetboard_config::validation::validate_config(&config).map(|()| config)
            }),
        None => leetboard_config::load_and_validate(),
    };
    match result {
        Ok(config) => config,
        Err(errors) => {
            leetboard_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(&cli);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("config OK");
            println!("  bot.name            = {}", config.bot.name);
            println!("  storage.database    = {}", config.storage.database_path);
            println!("  leetcode.endpoint   = {}", config.leetcode.graphql_url);
            println!("  poller.interval     = {}s", config.poller.interval_secs);
            println!("  report.weekly_cron  = {}", config.report.weekly_cron);
            println!(
                "  telegram.bot_token  = {}",
                if config.telegram.bot_token.is_some() {
                    "(set)"
                } else {
                    "(missing)"
                }
            );
        }
        None => {
            println!("leetboard: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_linked() {
        // Touching the allocator proves the global allocator override
        // compiled in; allocation failure would abort the test.
        let v: Vec<u8> = Vec::with_capacity(1024);
        assert_eq!(v.capacity(), 1024);
    }

    #[test]
    fn default_config_is_valid() {
        let config = leetboard_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.bot.name, "leetboard");
    }
}
