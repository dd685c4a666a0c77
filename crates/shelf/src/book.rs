//! The book record model.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::BookId;

/// Timestamp applied to records the server returns without one, so that
/// sorting and filtering by date stay total.
pub const DEFAULT_TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

/// The known genre catalog, used for selection UIs. Genre values on
/// records themselves remain free-form text.
pub const GENRES: &[&str] = &[
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Fantasy",
    "Biography",
    "History",
    "Classic Literature",
    "Technology",
    "Business",
    "Self-Help",
    "Health",
    "Travel",
    "Cooking",
    "Art",
    "Philosophy",
    "Religion",
    "Sports",
    "Children",
];

/// Circulation status of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" | "available" => Ok(BookStatus::Available),
            "Issued" | "issued" => Ok(BookStatus::Issued),
            other => Err(ValidationError::Unrecognized {
                what: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// A book record as held by the remote store.
///
/// Timestamps are kept as the wire's ISO-8601 text; [`Book::created_at_time`]
/// and [`Book::updated_at_time`] parse them on demand for sorting and
/// filtering, treating missing or unparseable values as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub status: BookStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Book {
    /// The language of the record, defaulting to English.
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("English")
    }

    /// Parsed creation timestamp, if present and well-formed.
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    /// Parsed update timestamp, if present and well-formed.
    pub fn updated_at_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The editable fields of a book, used for create and update submissions.
/// The id is never part of a draft; the server assigns it on create and
/// it travels in the resource path on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub status: BookStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl BookDraft {
    /// Validate the draft against the form rules.
    ///
    /// Runs before any network call; a failing draft never reaches the
    /// remote store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required { field: "title" });
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::Required { field: "author" });
        }
        if self.genre.trim().is_empty() {
            return Err(ValidationError::Required { field: "genre" });
        }
        let max_year = Utc::now().year();
        if self.published_year < 1000 || self.published_year > max_year {
            return Err(ValidationError::YearOutOfRange {
                value: self.published_year,
                min: 1000,
                max: max_year,
            });
        }
        if let Some(rating) = self.rating
            && !(0.0..=5.0).contains(&rating)
        {
            return Err(ValidationError::RatingOutOfRange { value: rating });
        }
        if self.pages == Some(0) {
            return Err(ValidationError::PagesNotPositive);
        }
        Ok(())
    }

    /// Build a draft from an existing record, for edit prefill.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            published_year: book.published_year,
            status: book.status,
            rating: book.rating,
            pages: book.pages,
            language: book.language.clone(),
            description: book.description.clone(),
            cover: book.cover.clone(),
        }
    }
}
