//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::add::AddArgs;
use crate::commands::delete::DeleteArgs;
use crate::commands::list::ListArgs;
use crate::commands::stats::StatsArgs;
use crate::commands::update::UpdateArgs;
use crate::commands::view_mode::ViewModeArgs;

/// Book inventory CLI over a remote REST book service.
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Base URL of the book service
    #[arg(long, global = true, env = "SHELF_API_URL")]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List books with filters, sorting, and pagination
    List(ListArgs),

    /// Show library statistics
    Stats(StatsArgs),

    /// Add a new book
    Add(AddArgs),

    /// Update an existing book
    Update(UpdateArgs),

    /// Delete a book
    Delete(DeleteArgs),

    /// Print the known genre catalog
    Genres,

    /// Get or set the persisted view mode
    ViewMode(ViewModeArgs),
}
