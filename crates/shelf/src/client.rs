//! HTTP client for the remote book service.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::book::{Book, BookDraft, DEFAULT_TIMESTAMP};
use crate::error::RemoteError;
use crate::types::{BaseUrl, BookId};

/// Error body some backends return alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Request body for creating a book: the draft plus client-stamped
/// timestamps. The server assigns the id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookRequest<'a> {
    #[serde(flatten)]
    draft: &'a BookDraft,
    created_at: &'a str,
    updated_at: &'a str,
}

/// Request body for updating a book: the edited fields plus a refreshed
/// update timestamp. The id travels in the resource path, never the body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBookRequest<'a> {
    #[serde(flatten)]
    draft: &'a BookDraft,
    updated_at: &'a str,
}

/// HTTP client for the book collection resource.
///
/// Performs no retries: a single network failure surfaces immediately as
/// a [`RemoteError`] for the caller to translate into user feedback.
#[derive(Clone)]
pub struct BooksClient {
    client: reqwest::Client,
    base: BaseUrl,
    now: fn() -> DateTime<Utc>,
}

impl BooksClient {
    /// Create a new client for the given service base URL.
    pub fn new(base: BaseUrl) -> Self {
        Self::with_clock(base, Utc::now)
    }

    /// Create a client with an injected clock, for deterministic
    /// timestamp stamping in tests.
    pub fn with_clock(base: BaseUrl, now: fn() -> DateTime<Utc>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("shelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base, now }
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    fn timestamp(&self) -> String {
        (self.now)().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Fetch the full book collection.
    ///
    /// Records missing `createdAt` or `updatedAt` get the fixed default
    /// [`DEFAULT_TIMESTAMP`], so date sorts and filters stay total.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn list(&self) -> Result<Vec<Book>, RemoteError> {
        debug!("listing books");

        let response = self.client.get(self.base.books_url()).send().await?;
        let mut books: Vec<Book> = Self::handle_response(response).await?;

        for book in &mut books {
            book.created_at
                .get_or_insert_with(|| DEFAULT_TIMESTAMP.to_string());
            book.updated_at
                .get_or_insert_with(|| DEFAULT_TIMESTAMP.to_string());
        }

        trace!(count = books.len(), "listed books");
        Ok(books)
    }

    /// Create a book, stamping `createdAt` and `updatedAt` to the client
    /// clock. Returns the server's record, including the assigned id.
    #[instrument(skip(self, draft), fields(base = %self.base, title = %draft.title))]
    pub async fn create(&self, draft: &BookDraft) -> Result<Book, RemoteError> {
        debug!("creating book");

        let now = self.timestamp();
        let request = CreateBookRequest {
            draft,
            created_at: &now,
            updated_at: &now,
        };

        let response = self
            .client
            .post(self.base.books_url())
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Update a book, stamping `updatedAt` to the client clock. Returns
    /// the updated record.
    #[instrument(skip(self, draft), fields(base = %self.base, %id))]
    pub async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<Book, RemoteError> {
        debug!("updating book");

        let now = self.timestamp();
        let request = UpdateBookRequest {
            draft,
            updated_at: &now,
        };

        let response = self
            .client
            .put(self.base.book_url(id))
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Delete a book. Accepts any 2xx confirmation, body or not.
    #[instrument(skip(self), fields(base = %self.base, %id))]
    pub async fn delete(&self, id: &BookId) -> Result<(), RemoteError> {
        debug!("deleting book");

        let response = self.client.delete(self.base.book_url(id)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error_response(response).await)
        }
    }

    /// Handle a response, decoding the body or surfacing the error.
    async fn handle_response<R: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<R, RemoteError> {
        let status = response.status();
        trace!(status = %status, "service response");

        if status.is_success() {
            let body = response.json::<R>().await?;
            Ok(body)
        } else {
            Err(Self::parse_error_response(response).await)
        }
    }

    /// Turn a non-2xx response into a [`RemoteError::Status`], keeping
    /// whatever message the body carries.
    async fn parse_error_response(response: reqwest::Response) -> RemoteError {
        let status = response.status().as_u16();

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message.or(body.error),
            Err(_) => None,
        };

        RemoteError::Status { status, message }
    }
}

impl std::fmt::Debug for BooksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BooksClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
