//! Genres command implementation.

use anyhow::Result;

use shelf::GENRES;

pub fn run() -> Result<()> {
    for genre in GENRES {
        println!("{genre}");
    }
    Ok(())
}
