//! The pure query pipeline: filter, sort, paginate, aggregate.
//!
//! Every function here is deterministic given its inputs and touches no
//! shared state. Composition order is fixed: filter precedes sort, sort
//! precedes paginate. Stats are always computed from the full unfiltered
//! record set, never from a filtered or paginated view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::book::{Book, BookStatus};
use crate::error::ValidationError;

/// Which shelf the user is browsing: the whole library or one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Available,
    Issued,
}

impl Scope {
    /// Human-readable page title for the scope.
    pub fn page_title(&self) -> &'static str {
        match self {
            Scope::All => "All Books",
            Scope::Available => "Available Books",
            Scope::Issued => "Issued Books",
        }
    }
}

impl FromStr for Scope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Scope::All),
            "available" => Ok(Scope::Available),
            "issued" => Ok(Scope::Issued),
            other => Err(ValidationError::Unrecognized {
                what: "scope",
                value: other.to_string(),
            }),
        }
    }
}

/// Filter criteria. All set predicates are AND-combined; unset ones are
/// skipped. An empty criteria keeps every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub scope: Scope,
    /// Case-insensitive substring match over title, author, and genre.
    /// Blank or whitespace-only text is ignored.
    pub search: String,
    pub genre: Option<String>,
    pub status: Option<BookStatus>,
    pub year: Option<i32>,
    /// Same-calendar-day match against the record's creation timestamp.
    pub created_on: Option<NaiveDate>,
}

/// Sortable fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Title,
    Author,
    PublishedYear,
    Rating,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::PublishedYear => "publishedYear",
            SortField::Rating => "rating",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "publishedYear" => Ok(SortField::PublishedYear),
            "rating" => Ok(SortField::Rating),
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            other => Err(ValidationError::Unrecognized {
                what: "sort field",
                value: other.to_string(),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ValidationError::Unrecognized {
                what: "sort order",
                value: other.to_string(),
            }),
        }
    }
}

/// Dashboard statistics over the whole library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub available: usize,
    pub issued: usize,
    /// Count of distinct genre values present, not a fixed catalog.
    pub genres: usize,
}

/// Apply the filter criteria, keeping input order. Surviving records are
/// untouched; no criteria can ever produce an error, only an empty result.
pub fn filter(books: &[Book], criteria: &FilterCriteria) -> Vec<Book> {
    books
        .iter()
        .filter(|book| matches(book, criteria))
        .cloned()
        .collect()
}

fn matches(book: &Book, criteria: &FilterCriteria) -> bool {
    match criteria.scope {
        Scope::All => {}
        Scope::Available => {
            if book.status != BookStatus::Available {
                return false;
            }
        }
        Scope::Issued => {
            if book.status != BookStatus::Issued {
                return false;
            }
        }
    }

    let search = criteria.search.trim();
    if !search.is_empty() {
        let needle = search.to_lowercase();
        let hit = book.title.to_lowercase().contains(&needle)
            || book.author.to_lowercase().contains(&needle)
            || book.genre.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }

    if let Some(genre) = &criteria.genre
        && &book.genre != genre
    {
        return false;
    }

    // Independent of scope; both apply when both are set
    if let Some(status) = criteria.status
        && book.status != status
    {
        return false;
    }

    if let Some(year) = criteria.year
        && book.published_year != year
    {
        return false;
    }

    if let Some(day) = criteria.created_on {
        match book.created_at_time() {
            Some(created) => {
                if created.date_naive() != day {
                    return false;
                }
            }
            // No creation timestamp means no calendar day to match
            None => return false,
        }
    }

    true
}

/// Sort into a fresh ordering. The sort is stable: records with equal
/// keys keep their relative input order, in both directions.
pub fn sort(books: &[Book], field: SortField, order: SortOrder) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare(a: &Book, b: &Book, field: SortField) -> Ordering {
    match field {
        // Numeric: missing treated as 0
        SortField::PublishedYear => a.published_year.cmp(&b.published_year),
        SortField::Rating => a
            .rating
            .unwrap_or(0.0)
            .total_cmp(&b.rating.unwrap_or(0.0)),
        // Timestamps: compared as epoch millis, missing sorts as oldest
        SortField::CreatedAt => epoch_millis(a.created_at_time())
            .cmp(&epoch_millis(b.created_at_time())),
        SortField::UpdatedAt => epoch_millis(a.updated_at_time())
            .cmp(&epoch_millis(b.updated_at_time())),
        // Text: case-insensitive
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
    }
}

fn epoch_millis(time: Option<chrono::DateTime<chrono::Utc>>) -> i64 {
    time.map(|t| t.timestamp_millis()).unwrap_or(0)
}

/// Return the 1-based `page` of size `page_size`. Out-of-range pages
/// yield an empty slice, never an error.
pub fn paginate(books: &[Book], page: usize, page_size: usize) -> Vec<Book> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= books.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(books.len());
    books[start..end].to_vec()
}

/// Compute dashboard statistics. Callers must pass the full unfiltered
/// record set: totals reflect the whole library regardless of filters.
pub fn aggregate(books: &[Book]) -> LibraryStats {
    let genres: HashSet<&str> = books.iter().map(|b| b.genre.as_str()).collect();
    LibraryStats {
        total: books.len(),
        available: books
            .iter()
            .filter(|b| b.status == BookStatus::Available)
            .count(),
        issued: books
            .iter()
            .filter(|b| b.status == BookStatus::Issued)
            .count(),
        genres: genres.len(),
    }
}
