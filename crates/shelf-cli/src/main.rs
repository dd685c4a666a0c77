//! shelf - CLI front end for the book inventory toolkit.
//!
//! This is a thin rendering layer over the `shelf` library: it builds a
//! controller, applies the flags as view-state inputs, and prints the
//! derived views.

mod cli;
mod commands;
mod output;
mod prefs;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::List(args) => commands::list::run(&cli.api, args).await,
        Commands::Stats(args) => commands::stats::run(&cli.api, args).await,
        Commands::Add(args) => commands::add::run(&cli.api, args).await,
        Commands::Update(args) => commands::update::run(&cli.api, args).await,
        Commands::Delete(args) => commands::delete::run(&cli.api, args).await,
        Commands::Genres => commands::genres::run(),
        Commands::ViewMode(args) => commands::view_mode::run(args),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
