//! catwmigrate library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Rebuild => cli::commands::rebuild::handle(cfg),
        Commands::Migrate => cli::commands::migrate::handle(cfg),
        Commands::Status => cli::commands::status::handle(cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once; `init` creates the file, so a missing one is
    // fine for that command alone
    let mut cfg = if matches!(cli.command, Commands::Init) {
        Config::load(cli.config.as_deref()).unwrap_or_default()
    } else {
        Config::load(cli.config.as_deref())?
    };

    // command-line override of the replica path
    if let Some(custom) = &cli.replica {
        cfg.replica = custom.clone();
    }

    dispatch(&cli, &cfg)
}
