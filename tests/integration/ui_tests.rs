//! Pages driven end to end through the HTTP client

use tokio_test::{assert_err, assert_ok};

use elidune_books::{
    models::BookStatus,
    ui::{self, BookFormPage, BookListPage, ErrorBoundary, Route, SubmitOutcome},
    validation::BookField,
    AppError,
};

use crate::common::spawn_server;

#[tokio::test]
async fn test_list_page_renders_collection() {
    let server = spawn_server().await;
    let state = server.app_state();

    let out = assert_ok!(ui::render_route(&state, &Route::List).await);
    assert!(out.starts_with("[Book List]"));
    assert!(out.contains("Dune"));
    assert!(out.contains("Ulysses"));
    assert!(out.contains("/edit/3"));
    assert!(!state.store.snapshot().loading);
}

#[tokio::test]
async fn test_store_is_fetched_once_per_mount() {
    let server = spawn_server().await;
    let state = server.app_state();

    let mut page = BookListPage::open(&state);
    page.settled().await;
    page.render();
    page.render();
    assert_eq!(server.backend.list_calls(), 1);
    drop(page);

    let mut page = BookListPage::open(&state);
    page.settled().await;
    assert_eq!(server.backend.list_calls(), 2);
}

#[tokio::test]
async fn test_list_failure_is_shown() {
    let server = spawn_server().await;
    server.backend.fail_list(true);
    let state = server.app_state();

    let mut page = BookListPage::open(&state);
    page.settled().await;
    assert_eq!(page.render(), "Error: Request failed (HTTP 500): Failed to get books");
    assert!(state.store.snapshot().books.is_empty());
}

#[tokio::test]
async fn test_search_then_delete() {
    let server = spawn_server().await;
    let state = server.app_state();

    let mut page = BookListPage::open(&state);
    page.settled().await;
    page.set_search_term("emma");
    page.search().await;
    assert!(page.render().contains("Found 1 results for \"emma\""));

    assert!(page.delete("2", true).await);
    assert!(page.display_books().is_empty());
    assert_eq!(state.store.snapshot().books.len(), 2);
    assert_eq!(server.backend.book_count(), 2);
}

#[tokio::test]
async fn test_add_page_creates_book() {
    let server = spawn_server().await;
    let state = server.app_state();

    let mut page = BookFormPage::add(&state);
    page.settled().await;
    assert_ok!(page.change(BookField::Isbn, "1111111111111"));
    assert_ok!(page.change(BookField::Title, "Middlemarch"));
    assert_ok!(page.change(BookField::Subtitle, "A Study of Provincial Life"));
    assert_ok!(page.change(BookField::CopyrightYear, "1871"));
    assert_ok!(page.change(BookField::Status, "APPROVED"));

    let saved = match page.submit().await {
        SubmitOutcome::Saved(book) => book,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(saved.id, "4");
    assert_eq!(saved.status, BookStatus::Approved);
    assert_eq!(state.store.find("1111111111111"), Some(saved));
    assert_eq!(server.backend.book_count(), 4);
}

#[tokio::test]
async fn test_add_page_reports_rejected_submit() {
    let server = spawn_server().await;
    let state = server.app_state();

    let mut page = BookFormPage::add(&state);
    page.settled().await;
    assert_ok!(page.change(BookField::Isbn, "1234567890"));
    assert_ok!(page.change(BookField::Title, "Copy"));
    assert_ok!(page.change(BookField::Subtitle, "Copy"));
    assert_ok!(page.change(BookField::CopyrightYear, "2000"));

    assert_eq!(page.submit().await, SubmitOutcome::Failed);
    assert!(page.render().contains("Failed to submit book. Please try again."));
    assert_eq!(state.store.snapshot().books.len(), 3);
}

#[tokio::test]
async fn test_edit_page_updates_book() {
    let server = spawn_server().await;
    let state = server.app_state();

    let out = assert_ok!(ui::render_route(&state, &Route::Edit("1".to_string())).await);
    assert!(out.contains("Edit Book"));
    assert!(out.contains("Dune"));

    let mut page = BookFormPage::edit(&state, "1");
    page.settled().await;
    assert_ok!(page.change(BookField::Subtitle, "Book One, revised"));
    assert!(matches!(page.submit().await, SubmitOutcome::Saved(_)));

    let stored = assert_ok!(state.api.get_book("1").await);
    assert_eq!(stored.subtitle, "Book One, revised");
    assert_eq!(state.store.find("1").map(|b| b.subtitle), Some(stored.subtitle));
}

#[tokio::test]
async fn test_unknown_page_falls_back() {
    let server = spawn_server().await;
    let state = server.app_state();
    let mut boundary = ErrorBoundary::new();

    let err = assert_err!(ui::render_route(&state, &Route::Edit("404".to_string())).await);
    assert!(matches!(err, AppError::NotFound(_)));

    let out = boundary.render(|| Err(err));
    assert!(out.starts_with("Something went wrong."));
    assert!(out.contains("No book with id or ISBN '404'"));
    assert!(out.ends_with("[Try again?]"));
}
