//! List command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use shelf::{Scope, ViewMode};

use crate::commands::build_shelf;
use crate::output;
use crate::prefs;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Shelf scope: all, available, or issued
    #[arg(long, default_value = "all")]
    pub scope: String,

    /// Free-text search over title, author, and genre
    #[arg(long)]
    pub search: Option<String>,

    /// Exact genre filter
    #[arg(long)]
    pub genre: Option<String>,

    /// Exact status filter (Available or Issued)
    #[arg(long)]
    pub status: Option<String>,

    /// Exact published-year filter
    #[arg(long)]
    pub year: Option<i32>,

    /// Keep only books created on this day (YYYY-MM-DD)
    #[arg(long)]
    pub created: Option<NaiveDate>,

    /// Sort option, e.g. title-asc or publishedYear-desc
    #[arg(long, default_value = "title-asc")]
    pub sort: String,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size (10, 20, 50, or 100)
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,

    /// Force table output for this invocation
    #[arg(long, conflicts_with = "cards")]
    pub table: bool,

    /// Force card output for this invocation
    #[arg(long)]
    pub cards: bool,

    /// Print the raw records as JSON instead
    #[arg(long)]
    pub json: bool,
}

pub async fn run(api: &Option<String>, args: ListArgs) -> Result<()> {
    let mut shelf = build_shelf(api)?;
    shelf.refresh().await.context("Failed to fetch books")?;

    let view = shelf.view_mut();
    view.set_scope(args.scope.parse::<Scope>()?);
    if let Some(search) = args.search {
        view.set_search(search);
    }
    view.set_genre_filter(args.genre);
    view.set_status_filter(
        args.status
            .as_deref()
            .map(|s| s.parse::<shelf::BookStatus>())
            .transpose()?,
    );
    view.set_year_filter(args.year);
    view.set_date_filter(args.created);
    view.set_sort_option(&args.sort)?;
    view.set_page_size(args.page_size);
    view.set_page(args.page);

    let mode = if args.table {
        ViewMode::Table
    } else if args.cards {
        ViewMode::Card
    } else {
        match prefs::open() {
            Some(store) => shelf::prefs::load_view_mode(&store),
            None => ViewMode::Card,
        }
    };
    shelf.view_mut().set_view_mode(mode);

    let books = shelf.paginated_books();
    if books.is_empty() {
        eprintln!("{}", "No books found.".dimmed());
        return Ok(());
    }

    if args.json {
        return output::json_pretty(&books);
    }

    println!("{}", shelf.view().scope().page_title().bold());
    println!();
    match mode {
        ViewMode::Card => {
            for book in &books {
                output::card(book);
            }
            eprintln!(
                "{}",
                format!("page {} of {}", shelf.view().page(), shelf.page_count()).dimmed()
            );
        }
        ViewMode::Table => {
            output::table_header();
            for book in &books {
                output::table_row(book);
            }
        }
    }

    Ok(())
}
