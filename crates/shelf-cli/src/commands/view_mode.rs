//! View-mode command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};

use shelf::ViewMode;
use shelf::prefs::{load_view_mode, save_view_mode};

use crate::output;
use crate::prefs;

#[derive(Args, Debug)]
pub struct ViewModeArgs {
    #[command(subcommand)]
    pub command: ViewModeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ViewModeSubcommand {
    /// Print the persisted view mode
    Get,

    /// Persist a view mode (card or table)
    Set {
        mode: String,
    },
}

pub fn run(args: ViewModeArgs) -> Result<()> {
    match args.command {
        ViewModeSubcommand::Get => {
            // Missing or unreadable storage reads as the default
            let mode = match prefs::open() {
                Some(store) => load_view_mode(&store),
                None => ViewMode::default(),
            };
            println!("{mode}");
        }
        ViewModeSubcommand::Set { mode } => {
            let mode = mode.parse::<ViewMode>()?;
            match prefs::open() {
                Some(mut store) => {
                    save_view_mode(&mut store, mode);
                    output::success(&format!("view mode set to {mode}"));
                }
                None => output::error("no writable config directory, view mode not persisted"),
            }
        }
    }
    Ok(())
}
