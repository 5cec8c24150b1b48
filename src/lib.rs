//! shiftboard library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod store;
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
        Commands::Start { .. } | Commands::Join { .. } => {
            cli::commands::start::handle(cli, &cli.command, cfg)
        }
        Commands::Pause { .. } | Commands::Resume { .. } | Commands::Stop { .. } => {
            cli::commands::transition::handle(cli, &cli.command, cfg)
        }
        Commands::Edit { .. } => cli::commands::edit::handle(cli, &cli.command, cfg),
        Commands::Qty { .. } | Commands::ConfirmZero { .. } => {
            cli::commands::quantity::handle(cli, &cli.command, cfg)
        }
        Commands::Leave { .. } | Commands::Temp { .. } => {
            cli::commands::roster::handle(cli, &cli.command, cfg)
        }
        Commands::Board => cli::commands::board::handle(cli, cfg),
        Commands::Tick => cli::commands::tick::handle(cli, cfg),
        Commands::Save | Commands::Missing => cli::commands::save::handle(cli, &cli.command, cfg),
        Commands::ShiftEnd { .. } => cli::commands::shift_end::handle(cli, &cli.command, cfg),
        Commands::History => cli::commands::history::handle(cli, cfg),
        Commands::Watch { .. } => cli::commands::watch::handle(cli, &cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load();

    // apply DB override from the command line, if any
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
