//! Book list page with search and delete

use std::sync::Arc;

use crate::{
    models::Book,
    services::{BooksApi, BooksMount},
    store::BookAction,
    ui::render_table,
    AppState,
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this book?";
pub const DELETE_FAILED: &str = "Failed to delete book. Please try again.";
pub const SEARCH_PLACEHOLDER: &str = "Search books by title, subtitle, or ISBN...";

const COLUMNS: [&str; 6] = ["ISBN", "Title", "Subtitle", "Copyright Year", "Status", "Actions"];

pub struct BookListPage {
    api: Arc<dyn BooksApi>,
    mount: BooksMount,
    search_term: String,
    /// `Some` while search results replace the full list
    search_results: Option<Vec<Book>>,
    notice: Option<String>,
}

impl BookListPage {
    /// Mount the page; starts loading the collection
    pub fn open(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            mount: state.loader().mount(),
            search_term: String::new(),
            search_results: None,
            notice: None,
        }
    }

    pub async fn settled(&mut self) {
        self.mount.settled().await;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn is_showing_search_results(&self) -> bool {
        self.search_results.is_some()
    }

    /// Last delete failure, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Run the current search term against the service.
    ///
    /// A blank term goes back to the full list. A failed search keeps
    /// whatever was displayed before.
    pub async fn search(&mut self) {
        if self.search_term.trim().is_empty() {
            self.search_results = None;
            return;
        }

        match self.api.search_books(&self.search_term).await {
            Ok(results) => {
                tracing::debug!("Search '{}' returned {} books", self.search_term, results.len());
                self.search_results = Some(results);
            }
            Err(e) => tracing::error!("Error searching books: {}", e),
        }
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.search_results = None;
    }

    /// Delete a book once the user has `confirmed`; returns whether it was deleted
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }

        self.notice = None;
        match self.api.delete_book(id).await {
            Ok(()) => {
                tracing::info!("Deleted book id={}", id);
                self.mount.store().dispatch(BookAction::Delete(id.to_string()));
                if let Some(results) = self.search_results.as_mut() {
                    results.retain(|b| b.id != id);
                }
                true
            }
            Err(e) => {
                tracing::error!("Error deleting book: {}", e);
                self.notice = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }

    /// Search results when a search is active, otherwise the whole collection
    pub fn display_books(&self) -> Vec<Book> {
        match &self.search_results {
            Some(results) => results.clone(),
            None => self.mount.state().books,
        }
    }

    pub fn render(&self) -> String {
        let state = self.mount.state();
        if state.loading {
            return "Loading...".to_string();
        }
        if let Some(error) = state.error {
            return format!("Error: {}", error);
        }

        let books = self.display_books();
        let mut out = String::from("Book List\n\n");

        let term = if self.search_term.is_empty() {
            SEARCH_PLACEHOLDER
        } else {
            self.search_term.as_str()
        };
        out.push_str(&format!("Search: {}  [Search]", term));
        if self.is_showing_search_results() {
            out.push_str("  [Clear Search]");
            out.push_str(&format!(
                "\nFound {} results for \"{}\"",
                books.len(),
                self.search_term
            ));
        }
        out.push('\n');

        if let Some(notice) = &self.notice {
            out.push_str(notice);
            out.push('\n');
        }
        out.push('\n');

        let rows: Vec<Vec<String>> = books
            .iter()
            .map(|book| {
                vec![
                    book.isbn.clone(),
                    book.title.clone(),
                    book.subtitle.clone(),
                    book.copyright_year.clone(),
                    book.status.to_string(),
                    format!("edit /edit/{}", book.id),
                ]
            })
            .collect();
        out.push_str(&render_table(&COLUMNS, &rows));
        out
    }
}
