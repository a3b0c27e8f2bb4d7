//! Text front end: page models, navigation and error boundary

pub mod boundary;
pub mod form;
pub mod layout;
pub mod list;

pub use boundary::ErrorBoundary;
pub use form::{BookFormPage, FormMode, SubmitOutcome};
pub use layout::Route;
pub use list::BookListPage;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    AppState,
};

/// Open the page behind `route`, wait for its data and render it inside the layout
pub async fn render_route(state: &AppState, route: &Route) -> AppResult<String> {
    let content = match route {
        Route::List => {
            let mut page = BookListPage::open(state);
            page.settled().await;
            page.render()
        }
        Route::Add => {
            let mut page = BookFormPage::add(state);
            page.settled().await;
            page.render()
        }
        Route::Edit(id) => {
            let mut page = BookFormPage::edit(state, id);
            page.settled().await;
            if let Some(error) = page.load_error() {
                return Err(AppError::Render(format!("Error: {}", error)));
            }
            if page.loaded_book_id().is_none() {
                return Err(AppError::NotFound(format!("No book with id or ISBN '{}'", id)));
            }
            page.render()
        }
    };
    Ok(layout::render_layout(route, &content))
}

/// Detail view of a single book
pub fn render_book(book: &Book) -> String {
    let rows = [
        ("ID", book.id.as_str()),
        ("ISBN", book.isbn.as_str()),
        ("Title", book.title.as_str()),
        ("Subtitle", book.subtitle.as_str()),
        ("Copyright Year", book.copyright_year.as_str()),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{:<16}{}\n", label, value));
    }
    out.push_str(&format!("{:<16}{}\n", "Status", book.status));
    out
}

/// Plain text table with columns padded to their widest cell
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ");
        line.trim_end().to_string()
    };

    let mut out = format_row(headers.to_vec());
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
    }
    out
}
