//! Update command implementation.
//!
//! Mirrors the edit-modal flow: fetch the record, prefill a draft from
//! it, overlay the flags the user passed, and submit.

use anyhow::{Context, Result};
use clap::Args;

use shelf::{BookDraft, BookStatus};

use crate::commands::{build_shelf, report_notices};
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the book to update
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    /// Circulation status (Available or Issued)
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub rating: Option<f64>,

    #[arg(long)]
    pub pages: Option<u32>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub cover: Option<String>,
}

impl UpdateArgs {
    /// Overlay the passed flags on a draft prefilled from the record.
    fn apply(self, mut draft: BookDraft) -> Result<BookDraft> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(author) = self.author {
            draft.author = author;
        }
        if let Some(genre) = self.genre {
            draft.genre = genre;
        }
        if let Some(year) = self.year {
            draft.published_year = year;
        }
        if let Some(status) = self.status {
            draft.status = status.parse::<BookStatus>()?;
        }
        if let Some(rating) = self.rating {
            draft.rating = Some(rating);
        }
        if let Some(pages) = self.pages {
            draft.pages = Some(pages);
        }
        if let Some(language) = self.language {
            draft.language = Some(language);
        }
        if let Some(description) = self.description {
            draft.description = Some(description);
        }
        if let Some(cover) = self.cover {
            draft.cover = Some(cover);
        }
        Ok(draft)
    }
}

pub async fn run(api: &Option<String>, args: UpdateArgs) -> Result<()> {
    let mut shelf = build_shelf(api)?;
    shelf.refresh().await.context("Failed to fetch books")?;

    let book = shelf
        .books()
        .iter()
        .find(|b| b.id.to_string() == args.id)
        .cloned()
        .with_context(|| format!("No book with id '{}'", args.id))?;

    shelf.view_mut().open_edit_modal(book.clone());
    let id = args.id.clone();
    let draft = args.apply(BookDraft::from_book(&book))?;

    if let Err(err) = shelf.submit(draft).await {
        output::error(&err.to_string());
        anyhow::bail!("validation failed");
    }

    tracing::debug!(%id, "update submitted");
    report_notices(&mut shelf)
}
