//! Add command implementation.

use anyhow::Result;
use clap::Args;

use shelf::{BookDraft, BookStatus};

use crate::commands::{build_shelf, report_notices};
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Book title
    #[arg(long)]
    pub title: String,

    /// Author name
    #[arg(long)]
    pub author: String,

    /// Genre
    #[arg(long)]
    pub genre: String,

    /// Published year
    #[arg(long)]
    pub year: i32,

    /// Circulation status (Available or Issued)
    #[arg(long, default_value = "Available")]
    pub status: String,

    /// Rating in [0, 5]
    #[arg(long)]
    pub rating: Option<f64>,

    /// Page count
    #[arg(long)]
    pub pages: Option<u32>,

    /// Language (defaults to English)
    #[arg(long)]
    pub language: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Cover image URL
    #[arg(long)]
    pub cover: Option<String>,
}

impl AddArgs {
    fn into_draft(self) -> Result<BookDraft> {
        Ok(BookDraft {
            title: self.title,
            author: self.author,
            genre: self.genre,
            published_year: self.year,
            status: self.status.parse::<BookStatus>()?,
            rating: self.rating,
            pages: self.pages,
            language: self.language,
            description: self.description,
            cover: self.cover,
        })
    }
}

pub async fn run(api: &Option<String>, args: AddArgs) -> Result<()> {
    let mut shelf = build_shelf(api)?;

    let draft = args.into_draft()?;
    if let Err(err) = shelf.create_book(draft).await {
        output::error(&err.to_string());
        anyhow::bail!("validation failed");
    }

    report_notices(&mut shelf)
}
