//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use shelf::{Book, BookStatus, Notice, NoticeLevel};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a notice from the mutation coordinator.
pub fn notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => success(&notice.message),
        NoticeLevel::Error => error(&notice.message),
    }
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn status_badge(status: BookStatus) -> colored::ColoredString {
    match status {
        BookStatus::Available => status.as_str().green(),
        BookStatus::Issued => status.as_str().yellow(),
    }
}

/// Print a book as a multi-line card.
pub fn card(book: &Book) {
    println!(
        "{} {}",
        book.title.bold(),
        format!("({})", book.published_year).dimmed()
    );
    println!("  {}: {}", "author".dimmed(), book.author);
    println!("  {}: {}", "genre".dimmed(), book.genre);
    println!("  {}: {}", "status".dimmed(), status_badge(book.status));
    if let Some(rating) = book.rating {
        println!("  {}: {rating:.1}/5", "rating".dimmed());
    }
    if let Some(description) = &book.description {
        println!("  {description}");
    }
    println!();
}

/// Print the table header row.
pub fn table_header() {
    println!(
        "{:<6} {:<32} {:<24} {:<18} {:<6} {}",
        "ID".dimmed(),
        "TITLE".dimmed(),
        "AUTHOR".dimmed(),
        "GENRE".dimmed(),
        "YEAR".dimmed(),
        "STATUS".dimmed()
    );
}

/// Print a book as one table row.
pub fn table_row(book: &Book) {
    println!(
        "{:<6} {:<32} {:<24} {:<18} {:<6} {}",
        book.id.to_string(),
        truncate(&book.title, 30),
        truncate(&book.author, 22),
        truncate(&book.genre, 16),
        book.published_year,
        status_badge(book.status)
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
