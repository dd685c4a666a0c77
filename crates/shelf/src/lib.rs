//! shelf - Client-side book inventory toolkit.
//!
//! This library talks to a REST book service and turns its flat record
//! collection into filtered, sorted, paginated, and aggregated views.
//! All state flows through a [`Shelf`] controller: user inputs land in
//! its [`ViewState`], mutations go through its coordinator methods, and
//! derived views are recomputed from the latest fetched collection.
//!
//! # Example
//!
//! ```no_run
//! use shelf::{BaseUrl, BooksClient, Shelf, Scope};
//!
//! # async fn example() -> Result<(), shelf::Error> {
//! let base = BaseUrl::new("https://books.example.com")?;
//! let mut shelf = Shelf::new(BooksClient::new(base));
//!
//! shelf.refresh().await?;
//! shelf.view_mut().set_scope(Scope::Available);
//! shelf.view_mut().set_search("herbert");
//!
//! for book in shelf.paginated_books() {
//!     println!("{} — {}", book.title, book.author);
//! }
//! println!("{:?}", shelf.stats());
//! # Ok(())
//! # }
//! ```

pub mod book;
pub mod cache;
pub mod client;
pub mod controller;
pub mod error;
pub mod mutation;
pub mod prefs;
pub mod query;
pub mod types;
pub mod view;

// Re-export primary types at crate root for convenience
pub use book::{Book, BookDraft, BookStatus, DEFAULT_TIMESTAMP, GENRES};
pub use cache::BookCache;
pub use client::BooksClient;
pub use controller::Shelf;
pub use error::{Error, RemoteError, StorageError, ValidationError};
pub use mutation::{MutationKind, MutationState, Notice, NoticeLevel};
pub use query::{FilterCriteria, LibraryStats, Scope, SortField, SortOrder};
pub use types::{BaseUrl, BookId};
pub use view::{PAGE_SIZES, SORT_OPTIONS, ViewMode, ViewState};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
