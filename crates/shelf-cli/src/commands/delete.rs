//! Delete command implementation.

use anyhow::Result;
use clap::Args;

use shelf::BookId;

use crate::commands::{build_shelf, report_notices};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the book to delete
    pub id: String,
}

pub async fn run(api: &Option<String>, args: DeleteArgs) -> Result<()> {
    let mut shelf = build_shelf(api)?;

    shelf.delete_book(&BookId::from(args.id)).await;

    report_notices(&mut shelf)
}
