//! rtasks library root.
//! Exposes the CLI parser, the high-level run() function, and internal modules.

pub mod api;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
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
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Login { .. } | Commands::Logout => cli::commands::login::handle(&cli.command, cfg),
        Commands::Epoch { .. } => cli::commands::epoch::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Plan { .. } => cli::commands::plan::handle(&cli.command, cfg),
        Commands::Move { .. } => cli::commands::plan::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, cfg),
        Commands::Done { .. } => cli::commands::done::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::Cache { .. } => cli::commands::cache::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    //
    // 1) PARSE CLI
    //
    let cli = Cli::parse();

    //
    // 2) LOAD CONFIG ONCE, then apply command-line overrides
    //
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        cfg.endpoint = endpoint.clone();
    }

    //
    // 3) DIAGNOSTIC LOGGING (never fatal)
    //
    let level = if cli.verbose { "debug" } else { cfg.log_level.as_str() };
    if let Err(e) = logging::init_logging(level, &Config::log_dir()) {
        if cli.verbose {
            ui::messages::warning(format!("Logging disabled: {}", e));
        }
    }

    //
    // 4) DISPATCH
    //
    dispatch(&cli, &cfg)
}
