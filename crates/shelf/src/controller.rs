//! The shelf controller: wires view state, the query pipeline, the
//! versioned cache, and the mutation coordinator together.
//!
//! All user actions flow through this type. Remote failures during a
//! mutation never escape it: they become error notices and leave the
//! modal, editing target, and cache untouched. Validation failures are
//! returned to the form boundary before any network call is made.

use tracing::{info, instrument, warn};

use crate::book::{Book, BookDraft};
use crate::cache::BookCache;
use crate::client::BooksClient;
use crate::error::{RemoteError, ValidationError};
use crate::mutation::{MutationKind, MutationState, MutationTracker, Notice};
use crate::query::{self, LibraryStats};
use crate::types::BookId;
use crate::view::{ViewMode, ViewState};

/// The client-side book inventory: one per UI surface.
#[derive(Debug)]
pub struct Shelf {
    client: BooksClient,
    cache: BookCache,
    view: ViewState,
    mutations: MutationTracker,
    notices: Vec<Notice>,
}

impl Shelf {
    pub fn new(client: BooksClient) -> Self {
        Self {
            client,
            cache: BookCache::new(),
            view: ViewState::new(),
            mutations: MutationTracker::default(),
            notices: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable view state. Input invariants (pagination reset on filter
    /// change) are enforced by [`ViewState`] itself.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn mutation_state(&self, kind: MutationKind) -> MutationState {
        self.mutations.state(kind)
    }

    /// Whether form submission should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.mutations.is_submitting()
    }

    /// Notices accumulated since the last drain.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take the pending notices for display.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// The latest fetched record set.
    pub fn books(&self) -> &[Book] {
        self.cache.books()
    }

    /// The filtered and sorted collection.
    pub fn filtered_books(&self) -> Vec<Book> {
        let filtered = query::filter(self.cache.books(), &self.view.criteria());
        query::sort(&filtered, self.view.sort_by(), self.view.sort_order())
    }

    /// The visible window of the filtered collection.
    ///
    /// Card view slices the current page; table view returns the whole
    /// filtered set and pages it internally. Both page over the same
    /// filtered set, so [`Shelf::page_count`] matches across modes.
    pub fn paginated_books(&self) -> Vec<Book> {
        let filtered = self.filtered_books();
        match self.view.view_mode() {
            ViewMode::Table => filtered,
            ViewMode::Card => query::paginate(&filtered, self.view.page(), self.view.page_size()),
        }
    }

    /// Number of pages over the filtered set at the current page size.
    pub fn page_count(&self) -> usize {
        self.filtered_books().len().div_ceil(self.view.page_size())
    }

    /// Dashboard statistics, always over the full unfiltered library.
    pub fn stats(&self) -> LibraryStats {
        query::aggregate(self.cache.books())
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Fetch the collection and apply it to the cache.
    ///
    /// Fetches are versioned: if another refresh completed while this
    /// one was in flight, the older result is discarded.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), RemoteError> {
        let version = self.cache.begin_fetch();
        let books = self.client.list().await?;
        self.cache.complete_fetch(version, books);
        Ok(())
    }

    /// Re-fetch after an invalidation, best effort. The cache stays
    /// stale on failure, so a later refresh will retry.
    async fn refetch(&mut self) {
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "re-fetch after mutation failed");
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Submit the modal form: update when an editing target is set,
    /// create otherwise.
    pub async fn submit(&mut self, draft: BookDraft) -> Result<(), ValidationError> {
        match self.view.editing_id().cloned() {
            Some(id) => self.update_book(&id, draft).await,
            None => self.create_book(draft).await,
        }
    }

    /// Create a book.
    ///
    /// A validation failure blocks the network call entirely. On remote
    /// success the cache is invalidated, the modal closed, a success
    /// notice emitted, and a re-fetch issued. On remote failure an error
    /// notice is emitted and the modal stays open with the form intact.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_book(&mut self, draft: BookDraft) -> Result<(), ValidationError> {
        draft.validate()?;

        self.mutations.begin(MutationKind::Create);
        match self.client.create(&draft).await {
            Ok(book) => {
                info!(id = %book.id, "book created");
                self.mutations.finish(MutationKind::Create, true);
                self.cache.invalidate();
                self.view.close_modal();
                self.push_notice(Notice::success("Book added successfully!"));
                self.refetch().await;
            }
            Err(err) => {
                warn!(error = %err, "create failed");
                self.mutations.finish(MutationKind::Create, false);
                self.push_notice(Notice::error("Failed to add book"));
            }
        }
        Ok(())
    }

    /// Update a book. Same contract as [`Shelf::create_book`]; on
    /// success the editing target is also cleared.
    #[instrument(skip(self, draft), fields(%id))]
    pub async fn update_book(
        &mut self,
        id: &BookId,
        draft: BookDraft,
    ) -> Result<(), ValidationError> {
        draft.validate()?;

        self.mutations.begin(MutationKind::Update);
        match self.client.update(id, &draft).await {
            Ok(book) => {
                info!(id = %book.id, "book updated");
                self.mutations.finish(MutationKind::Update, true);
                self.cache.invalidate();
                self.view.close_modal();
                self.push_notice(Notice::success("Book updated successfully!"));
                self.refetch().await;
            }
            Err(err) => {
                warn!(error = %err, "update failed");
                self.mutations.finish(MutationKind::Update, false);
                self.push_notice(Notice::error("Failed to update book"));
            }
        }
        Ok(())
    }

    /// Delete a book. No modal is involved; on success the cache is
    /// invalidated, a notice emitted, and a re-fetch issued.
    #[instrument(skip(self), fields(%id))]
    pub async fn delete_book(&mut self, id: &BookId) {
        self.mutations.begin(MutationKind::Delete);
        match self.client.delete(id).await {
            Ok(()) => {
                info!("book deleted");
                self.mutations.finish(MutationKind::Delete, true);
                self.cache.invalidate();
                self.push_notice(Notice::success("Book deleted successfully!"));
                self.refetch().await;
            }
            Err(err) => {
                warn!(error = %err, "delete failed");
                self.mutations.finish(MutationKind::Delete, false);
                self.push_notice(Notice::error("Failed to delete book"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaseUrl;

    #[test]
    fn validation_failure_blocks_submission() {
        // An invalid draft must be rejected before the client is touched;
        // the base URL here points nowhere routable.
        let client = BooksClient::new(BaseUrl::new("https://invalid.example").unwrap());
        let mut shelf = Shelf::new(client);

        let result = block_on(shelf.create_book(BookDraft::default()));
        assert!(matches!(
            result,
            Err(ValidationError::Required { field: "title" })
        ));
        assert_eq!(
            shelf.mutation_state(MutationKind::Create),
            MutationState::Idle
        );
        assert!(shelf.notices().is_empty());
    }

    // Minimal executor for a future known not to touch the network.
    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
            .block_on(fut)
    }
}
