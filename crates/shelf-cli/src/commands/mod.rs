//! Subcommand implementations.

pub mod add;
pub mod delete;
pub mod genres;
pub mod list;
pub mod stats;
pub mod update;
pub mod view_mode;

use anyhow::{Context, Result, bail};

use shelf::{BaseUrl, BooksClient, Shelf};

/// Build a controller for the configured service.
pub fn build_shelf(api: &Option<String>) -> Result<Shelf> {
    let api = api
        .as_deref()
        .context("No service configured. Pass --api or set SHELF_API_URL.")?;
    let base = BaseUrl::new(api).context("Invalid service base URL")?;
    Ok(Shelf::new(BooksClient::new(base)))
}

/// Print the coordinator's notices and fail the command if any of them
/// is an error.
pub fn report_notices(shelf: &mut Shelf) -> Result<()> {
    let notices = shelf.drain_notices();
    let mut failed = false;
    for notice in &notices {
        crate::output::notice(notice);
        failed |= notice.level == shelf::NoticeLevel::Error;
    }
    if failed {
        bail!("operation failed");
    }
    Ok(())
}
