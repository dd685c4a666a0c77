//! View state: filters, sort, pagination, view mode, and the modal.
//!
//! Fields are private so the pagination-reset rule cannot be bypassed:
//! changing any filter or sort input puts the user back on page 1,
//! preventing a landing on an empty out-of-range page after narrowing.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::book::{Book, BookStatus};
use crate::error::ValidationError;
use crate::query::{FilterCriteria, Scope, SortField, SortOrder};
use crate::types::BookId;

/// Selectable page sizes.
pub const PAGE_SIZES: &[usize] = &[10, 20, 50, 100];

/// Sort selector options as label / `field-order` value pairs.
pub const SORT_OPTIONS: &[(&str, &str)] = &[
    ("Title A-Z", "title-asc"),
    ("Title Z-A", "title-desc"),
    ("Author A-Z", "author-asc"),
    ("Author Z-A", "author-desc"),
    ("Year (Newest)", "publishedYear-desc"),
    ("Year (Oldest)", "publishedYear-asc"),
    ("Recently Added", "createdAt-desc"),
    ("Recently Updated", "updatedAt-desc"),
    ("Rating (High)", "rating-desc"),
    ("Rating (Low)", "rating-asc"),
];

/// How the collection is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Card,
    Table,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Card => "card",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(ViewMode::Card),
            "table" => Ok(ViewMode::Table),
            other => Err(ValidationError::Unrecognized {
                what: "view mode",
                value: other.to_string(),
            }),
        }
    }
}

/// The UI's complete view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    scope: Scope,
    search: String,
    sort_by: SortField,
    sort_order: SortOrder,
    genre_filter: Option<String>,
    status_filter: Option<BookStatus>,
    year_filter: Option<i32>,
    date_filter: Option<NaiveDate>,
    page: usize,
    page_size: usize,
    view_mode: ViewMode,
    modal_open: bool,
    editing: Option<Book>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scope: Scope::All,
            search: String::new(),
            sort_by: SortField::Title,
            sort_order: SortOrder::Asc,
            genre_filter: None,
            status_filter: None,
            year_filter: None,
            date_filter: None,
            page: 1,
            page_size: PAGE_SIZES[0],
            view_mode: ViewMode::Card,
            modal_open: false,
            editing: None,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn genre_filter(&self) -> Option<&str> {
        self.genre_filter.as_deref()
    }

    pub fn status_filter(&self) -> Option<BookStatus> {
        self.status_filter
    }

    pub fn year_filter(&self) -> Option<i32> {
        self.year_filter
    }

    pub fn date_filter(&self) -> Option<NaiveDate> {
        self.date_filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// The record being edited, if the modal was opened for an edit.
    pub fn editing(&self) -> Option<&Book> {
        self.editing.as_ref()
    }

    /// The id of the record being edited.
    pub fn editing_id(&self) -> Option<&BookId> {
        self.editing.as_ref().map(|b| &b.id)
    }

    /// The active filter criteria, assembled from the current inputs.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            scope: self.scope,
            search: self.search.clone(),
            genre: self.genre_filter.clone(),
            status: self.status_filter,
            year: self.year_filter,
            created_on: self.date_filter,
        }
    }

    // ------------------------------------------------------------------
    // Filter and sort inputs (all reset pagination to page 1)
    // ------------------------------------------------------------------

    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_by = field;
        self.sort_order = order;
        self.page = 1;
    }

    /// Parse a combined `field-order` selector value such as
    /// `"publishedYear-desc"`.
    pub fn set_sort_option(&mut self, option: &str) -> Result<(), ValidationError> {
        let (field, order) =
            option
                .rsplit_once('-')
                .ok_or_else(|| ValidationError::Unrecognized {
                    what: "sort option",
                    value: option.to_string(),
                })?;
        self.set_sort(field.parse()?, order.parse()?);
        Ok(())
    }

    pub fn set_genre_filter(&mut self, genre: Option<String>) {
        self.genre_filter = genre;
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<BookStatus>) {
        self.status_filter = status;
        self.page = 1;
    }

    pub fn set_year_filter(&mut self, year: Option<i32>) {
        self.year_filter = year;
        self.page = 1;
    }

    pub fn set_date_filter(&mut self, date: Option<NaiveDate>) {
        self.date_filter = date;
        self.page = 1;
    }

    /// Reset search, sort, and the genre/status/year/date filters to
    /// defaults and return to page 1. Scope and view mode are untouched.
    pub fn clear_all_filters(&mut self) {
        self.search.clear();
        self.sort_by = SortField::Title;
        self.sort_order = SortOrder::Asc;
        self.genre_filter = None;
        self.status_filter = None;
        self.year_filter = None;
        self.date_filter = None;
        self.page = 1;
    }

    // ------------------------------------------------------------------
    // Pagination and presentation
    // ------------------------------------------------------------------

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    // ------------------------------------------------------------------
    // Modal
    // ------------------------------------------------------------------

    /// Open the modal with a blank form.
    pub fn open_add_modal(&mut self) {
        self.editing = None;
        self.modal_open = true;
    }

    /// Open the modal prefilled with an existing record.
    pub fn open_edit_modal(&mut self, book: Book) {
        self.editing = Some(book);
        self.modal_open = true;
    }

    /// Close the modal and drop any editing target.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.editing = None;
    }
}
