//! Versioned holder for the fetched record list.
//!
//! The cache is the single piece of shared state all views derive from.
//! Fetches are keyed by a monotonic version so a response from a
//! superseded `list()` call can never overwrite fresher data.

use tracing::debug;

use crate::book::Book;

/// The cached book collection plus its fetch version.
#[derive(Debug, Default)]
pub struct BookCache {
    books: Vec<Book>,
    next_version: u64,
    applied_version: u64,
    stale: bool,
}

impl BookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently applied record set. Empty until the first fetch
    /// completes.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Reserve a version for a fetch that is about to start.
    pub fn begin_fetch(&mut self) -> u64 {
        self.next_version += 1;
        self.next_version
    }

    /// Apply the result of a completed fetch.
    ///
    /// Returns `false` (and leaves the cache untouched) when a newer
    /// fetch has already been applied, so out-of-order completions of
    /// rapid re-fetches cannot roll the collection back.
    pub fn complete_fetch(&mut self, version: u64, books: Vec<Book>) -> bool {
        if version <= self.applied_version {
            debug!(
                version,
                applied = self.applied_version,
                "dropping superseded list response"
            );
            return false;
        }
        self.applied_version = version;
        self.books = books;
        self.stale = false;
        true
    }

    /// Mark the held record set stale, forcing the next refresh.
    /// Issued by the mutation coordinator on every successful mutation.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Whether the held set is stale or has never been fetched.
    pub fn is_stale(&self) -> bool {
        self.stale || self.applied_version == 0
    }
}
