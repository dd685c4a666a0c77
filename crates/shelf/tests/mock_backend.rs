//! Mock backend tests for the shelf library.
//!
//! These tests use wiremock to simulate the remote book service and test
//! the library's behavior without network access or a real backend.

use chrono::{DateTime, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelf::{
    BaseUrl, BookDraft, BookId, BookStatus, BooksClient, MutationKind, MutationState, NoticeLevel,
    Shelf, DEFAULT_TIMESTAMP,
};

/// Helper to create a base URL from a mock server.
fn mock_base_url(server: &MockServer) -> BaseUrl {
    // For tests, we need to allow HTTP localhost
    BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn fixed_clock() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T12:00:00.000Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn dune(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Dune",
        "author": "Frank Herbert",
        "genre": "Science Fiction",
        "publishedYear": 1965,
        "status": "Available",
        "createdAt": "2024-03-01T10:00:00.000Z",
        "updatedAt": "2024-03-01T10:00:00.000Z"
    })
}

fn draft(title: &str) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        genre: "Science Fiction".to_string(),
        published_year: 1965,
        status: BookStatus::Available,
        ..Default::default()
    }
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune(1)])))
        .mount(&server)
        .await;

    let client = BooksClient::new(mock_base_url(&server));
    let books = client.list().await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].id, BookId::from(1));
}

#[tokio::test]
async fn test_list_fills_default_timestamps() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "title": "Old Record",
                "author": "Unknown",
                "genre": "History",
                "publishedYear": 1900,
                "status": "Issued"
            }
        ])))
        .mount(&server)
        .await;

    let client = BooksClient::new(mock_base_url(&server));
    let books = client.list().await.unwrap();

    assert_eq!(books[0].created_at.as_deref(), Some(DEFAULT_TIMESTAMP));
    assert_eq!(books[0].updated_at.as_deref(), Some(DEFAULT_TIMESTAMP));
    // The default keeps date sorts total
    assert!(books[0].created_at_time().is_some());
}

#[tokio::test]
async fn test_list_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = BooksClient::new(mock_base_url(&server));
    let books = client.list().await.unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_list_non_json_error_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = BooksClient::new(mock_base_url(&server));
    let result = client.list().await;

    assert!(result.is_err());
    // Should handle non-JSON error gracefully
    let err = result.unwrap_err().to_string();
    assert!(err.contains("500"));
}

#[tokio::test]
async fn test_list_malformed_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "an array"})))
        .mount(&server)
        .await;

    let client = BooksClient::new(mock_base_url(&server));
    assert!(client.list().await.is_err());
}

// ============================================================================
// Mutation Coordinator Tests
// ============================================================================

#[tokio::test]
async fn test_create_success_invalidates_and_refetches() {
    let server = MockServer::start().await;

    // Initial collection holds one record
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune(1)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(201).set_body_json(dune(2)))
        .mount(&server)
        .await;

    // The re-fetch after create sees the new id-bearing record
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune(1), dune(2)])))
        .mount(&server)
        .await;

    let mut shelf = Shelf::new(BooksClient::new(mock_base_url(&server)));
    shelf.refresh().await.unwrap();
    assert_eq!(shelf.books().len(), 1);

    shelf.view_mut().open_add_modal();
    shelf.submit(draft("Dune Messiah")).await.unwrap();

    assert_eq!(
        shelf.mutation_state(MutationKind::Create),
        MutationState::Succeeded
    );
    assert!(!shelf.view().is_modal_open());

    let notices = shelf.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);

    // The refreshed collection contains the created record
    assert!(shelf.books().iter().any(|b| b.id == BookId::from(2)));
}

#[tokio::test]
async fn test_create_stamps_client_timestamps() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/books"))
        .and(body_partial_json(json!({
            "title": "Dune",
            "createdAt": "2024-06-01T12:00:00.000Z",
            "updatedAt": "2024-06-01T12:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(dune(5)))
        .expect(1)
        .mount(&server)
        .await;

    let client = BooksClient::with_clock(mock_base_url(&server), fixed_clock);
    let created = client.create(&draft("Dune")).await.unwrap();
    assert_eq!(created.id, BookId::from(5));
}

#[tokio::test]
async fn test_update_failure_keeps_modal_and_editing_target() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune(1)])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/books/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "database on fire"
        })))
        .mount(&server)
        .await;

    let mut shelf = Shelf::new(BooksClient::new(mock_base_url(&server)));
    shelf.refresh().await.unwrap();

    let editing = shelf.books()[0].clone();
    shelf.view_mut().open_edit_modal(editing.clone());

    shelf.submit(draft("Dune, revised")).await.unwrap();

    assert_eq!(
        shelf.mutation_state(MutationKind::Update),
        MutationState::Failed
    );
    // The user's in-progress edit is preserved
    assert!(shelf.view().is_modal_open());
    assert_eq!(shelf.view().editing(), Some(&editing));

    let notices = shelf.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);

    // The cache was not invalidated and still shows pre-mutation data
    assert_eq!(shelf.books()[0].title, "Dune");
}

#[tokio::test]
async fn test_update_success_clears_editing_target() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune(1)])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/books/1"))
        .and(body_partial_json(json!({"updatedAt": "2024-06-01T12:00:00.000Z"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune(1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut shelf = Shelf::new(BooksClient::with_clock(mock_base_url(&server), fixed_clock));
    shelf.refresh().await.unwrap();

    let editing = shelf.books()[0].clone();
    shelf.view_mut().open_edit_modal(editing);
    shelf.submit(draft("Dune")).await.unwrap();

    assert_eq!(
        shelf.mutation_state(MutationKind::Update),
        MutationState::Succeeded
    );
    assert!(!shelf.view().is_modal_open());
    assert!(shelf.view().editing().is_none());
}

#[tokio::test]
async fn test_delete_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune(1)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/books/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut shelf = Shelf::new(BooksClient::new(mock_base_url(&server)));
    shelf.refresh().await.unwrap();

    let id = shelf.books()[0].id.clone();
    shelf.delete_book(&id).await;

    assert_eq!(
        shelf.mutation_state(MutationKind::Delete),
        MutationState::Succeeded
    );
    let notices = shelf.drain_notices();
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert!(shelf.books().is_empty());
}

#[tokio::test]
async fn test_delete_failure_emits_error_notice() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/books/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Not found"
        })))
        .mount(&server)
        .await;

    let mut shelf = Shelf::new(BooksClient::new(mock_base_url(&server)));
    shelf.delete_book(&BookId::from(9)).await;

    assert_eq!(
        shelf.mutation_state(MutationKind::Delete),
        MutationState::Failed
    );
    let notices = shelf.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_validation_failure_never_reaches_the_network() {
    let server = MockServer::start().await;

    // No POST mock mounted: any request would 404 and flip the state to
    // Failed, so an Idle state proves the network was never touched.
    let mut shelf = Shelf::new(BooksClient::new(mock_base_url(&server)));

    let mut bad = draft("Dune");
    bad.published_year = 999;
    let result = shelf.create_book(bad).await;

    assert!(result.is_err());
    assert_eq!(
        shelf.mutation_state(MutationKind::Create),
        MutationState::Idle
    );
    assert!(shelf.notices().is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

// ============================================================================
// Derived View Tests
// ============================================================================

#[tokio::test]
async fn test_stats_ignore_active_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            dune(1),
            {
                "id": 2,
                "title": "Foundation",
                "author": "Isaac Asimov",
                "genre": "Science Fiction",
                "publishedYear": 1951,
                "status": "Issued"
            }
        ])))
        .mount(&server)
        .await;

    let mut shelf = Shelf::new(BooksClient::new(mock_base_url(&server)));
    shelf.refresh().await.unwrap();

    shelf.view_mut().set_search("dune");
    assert_eq!(shelf.filtered_books().len(), 1);

    // Dashboard totals reflect the whole library regardless of filters
    let stats = shelf.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.available, 1);
    assert_eq!(stats.issued, 1);
    assert_eq!(stats.genres, 1);
}

#[tokio::test]
async fn test_page_count_matches_across_view_modes() {
    let server = MockServer::start().await;

    let books: Vec<serde_json::Value> = (1..=25).map(dune).collect();
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books))
        .mount(&server)
        .await;

    let mut shelf = Shelf::new(BooksClient::new(mock_base_url(&server)));
    shelf.refresh().await.unwrap();

    shelf.view_mut().set_view_mode(shelf::ViewMode::Card);
    let card_pages = shelf.page_count();
    assert_eq!(shelf.paginated_books().len(), 10);

    shelf.view_mut().set_view_mode(shelf::ViewMode::Table);
    let table_pages = shelf.page_count();
    // Table view pages internally over the whole filtered set
    assert_eq!(shelf.paginated_books().len(), 25);

    assert_eq!(card_pages, table_pages);
    assert_eq!(card_pages, 3);
}
