//! HTTP client against the in-process books service

use tokio_test::{assert_err, assert_ok};

use elidune_books::{
    models::{BookFormData, BookStatus},
    services::{BooksApi, HttpBooksApi},
    AppError,
};

use crate::common::spawn_server;

#[tokio::test]
async fn test_list_decodes_numeric_fields() {
    let server = spawn_server().await;
    let books = assert_ok!(server.api().list_books().await);

    assert_eq!(books.len(), 3);
    assert_eq!(books[0].id, "1");
    assert_eq!(books[0].copyright_year, "1965");
    assert_eq!(books[0].status, BookStatus::Approved);
    assert_eq!(books[2].status, BookStatus::Rejected);
}

#[tokio::test]
async fn test_get_book() {
    let server = spawn_server().await;
    let book = assert_ok!(server.api().get_book("2").await);
    assert_eq!(book.title, "Emma");
    assert_eq!(book.isbn, "9780000000001");
}

#[tokio::test]
async fn test_get_missing_book_is_not_found() {
    let server = spawn_server().await;
    let err = assert_err!(server.api().get_book("999").await);
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Book not found"));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_search_matches_title_subtitle_and_isbn() {
    let server = spawn_server().await;
    let api = server.api();

    let by_title = assert_ok!(api.search_books("dune").await);
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Dune");

    let by_subtitle = assert_ok!(api.search_books("Annotated").await);
    assert_eq!(by_subtitle[0].title, "Ulysses");

    let by_isbn = assert_ok!(api.search_books("978000").await);
    assert_eq!(by_isbn.len(), 2);
}

#[tokio::test]
async fn test_search_term_is_encoded() {
    let server = spawn_server().await;
    let found = assert_ok!(server.api().search_books("a novel & more").await);
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_empty_search_is_rejected_by_service() {
    let server = spawn_server().await;
    let err = assert_err!(server.api().search_books("").await);
    assert_eq!(err.to_string(), "Request failed (HTTP 400): Query parameter is required");
}

#[tokio::test]
async fn test_create_then_update_then_delete() {
    let server = spawn_server().await;
    let api = server.api();

    let form = BookFormData {
        isbn: "1111111111".to_string(),
        title: "New Book".to_string(),
        subtitle: "New Subtitle".to_string(),
        copyright_year: "2024".to_string(),
        status: Some(BookStatus::Pending),
    };
    let created = assert_ok!(api.create_book(&form).await);
    assert_eq!(created.id, "4");
    assert_eq!(created.copyright_year, "2024");
    assert_eq!(server.backend.book_count(), 4);

    let mut changed = created.clone();
    changed.title = "Renamed".to_string();
    changed.status = BookStatus::Approved;
    let updated = assert_ok!(api.update_book(&changed).await);
    assert_eq!(updated, changed);
    assert_eq!(assert_ok!(api.get_book("4").await).title, "Renamed");

    assert_ok!(api.delete_book("4").await);
    assert_eq!(server.backend.book_count(), 3);
    assert!(matches!(api.delete_book("4").await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_duplicate_isbn_is_reported() {
    let server = spawn_server().await;
    let form = BookFormData {
        isbn: "1234567890".to_string(),
        title: "Copy".to_string(),
        subtitle: "Copy".to_string(),
        copyright_year: "2000".to_string(),
        status: Some(BookStatus::Pending),
    };
    let err = assert_err!(server.api().create_book(&form).await);
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn test_server_error_message_is_kept() {
    let server = spawn_server().await;
    server.backend.fail_list(true);
    let err = assert_err!(server.api().list_books().await);
    assert_eq!(err.fault_message(), "Request failed (HTTP 500): Failed to get books");
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    let api = HttpBooksApi::new("http://127.0.0.1:1/api/books").unwrap();
    let err = assert_err!(api.list_books().await);
    assert!(matches!(err, AppError::Network(_)));
    assert!(!err.fault_message().is_empty());
}
