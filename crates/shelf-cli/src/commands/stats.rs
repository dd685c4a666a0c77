//! Stats command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::commands::build_shelf;
use crate::output;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print the stats as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(api: &Option<String>, args: StatsArgs) -> Result<()> {
    let mut shelf = build_shelf(api)?;
    shelf.refresh().await.context("Failed to fetch books")?;

    // Stats always cover the whole library, no filters apply
    let stats = shelf.stats();

    if args.json {
        return output::json_pretty(&stats);
    }

    println!("{}: {}", "total".dimmed(), stats.total);
    println!("{}: {}", "available".dimmed(), stats.available);
    println!("{}: {}", "issued".dimmed(), stats.issued);
    println!("{}: {}", "genres".dimmed(), stats.genres);
    Ok(())
}
