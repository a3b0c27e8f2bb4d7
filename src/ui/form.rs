//! Add / edit form page
//!
//! Field errors are shown only once a field has been touched (blurred);
//! submitting touches every field.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookFormData},
    services::{BooksApi, BooksMount},
    store::BookAction,
    validation::{validate_book, BookErrors, BookField},
    AppState,
};

pub const SUBMIT_FAILED: &str = "Failed to submit book. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    /// Edit the book whose id (or ISBN) is given
    Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Book),
    /// Validation failed, nothing was sent
    Invalid,
    /// The service rejected the request or could not be reached
    Failed,
}

pub struct BookFormPage {
    mode: FormMode,
    api: Arc<dyn BooksApi>,
    mount: BooksMount,
    form: BookFormData,
    errors: BookErrors,
    submit_error: Option<String>,
    touched: BTreeSet<BookField>,
    /// Id of the record loaded for editing
    editing: Option<String>,
}

impl BookFormPage {
    pub fn add(state: &AppState) -> Self {
        Self::open(state, FormMode::Add)
    }

    pub fn edit(state: &AppState, id: &str) -> Self {
        Self::open(state, FormMode::Edit(id.to_string()))
    }

    fn open(state: &AppState, mode: FormMode) -> Self {
        let mut page = Self {
            mode,
            api: state.api.clone(),
            mount: state.loader().mount(),
            form: BookFormData::default(),
            errors: BookErrors::default(),
            submit_error: None,
            touched: BTreeSet::new(),
            editing: None,
        };
        page.sync_from_store();
        page
    }

    /// Wait for the collection to load, then fill the form in edit mode
    pub async fn settled(&mut self) {
        self.mount.settled().await;
        self.sync_from_store();
    }

    /// Look the edited book up in the latest store state
    fn sync_from_store(&mut self) {
        match &self.mode {
            FormMode::Add => {
                self.form = BookFormData::default();
                self.reset_feedback();
            }
            FormMode::Edit(id) => {
                if let Some(book) = self.mount.store().find(id) {
                    self.form = book.form_data();
                    self.editing = Some(book.id);
                    self.reset_feedback();
                }
            }
        }
    }

    fn reset_feedback(&mut self) {
        self.touched.clear();
        self.errors = BookErrors::default();
        self.submit_error = None;
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &BookFormData {
        &self.form
    }

    pub fn loaded_book_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Edit mode waits for the collection before showing the form
    pub fn is_loading(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_)) && self.mount.state().loading
    }

    pub fn load_error(&self) -> Option<String> {
        self.mount.state().error
    }

    /// Update one field; re-validates it if it was already touched.
    ///
    /// An empty status value clears the selection.
    pub fn change(&mut self, field: BookField, value: &str) -> AppResult<()> {
        match field {
            BookField::Isbn => self.form.isbn = value.to_string(),
            BookField::Title => self.form.title = value.to_string(),
            BookField::Subtitle => self.form.subtitle = value.to_string(),
            BookField::CopyrightYear => self.form.copyright_year = value.to_string(),
            BookField::Status => {
                self.form.status = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                }
            }
        }

        if self.touched.contains(&field) {
            self.revalidate(field);
        }
        Ok(())
    }

    /// Mark a field as touched and show its current error
    pub fn blur(&mut self, field: BookField) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    fn revalidate(&mut self, field: BookField) {
        let errors = validate_book(&self.form);
        self.errors.set(field, errors.get(field).map(str::to_string));
    }

    /// Error to display next to `field`
    pub fn error(&self, field: BookField) -> Option<&str> {
        if self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Validate everything and, if valid, create or update the book
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.touched.extend(BookField::ALL);
        self.submit_error = None;
        self.errors = validate_book(&self.form);
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid;
        }

        let result = match &self.mode {
            FormMode::Add => self.save_new().await,
            FormMode::Edit(route_id) => {
                let id = self.editing.clone().unwrap_or_else(|| route_id.clone());
                self.save_existing(id).await
            }
        };

        match result {
            Ok(book) => SubmitOutcome::Saved(book),
            Err(e) => {
                tracing::error!("Error submitting book: {}", e);
                self.submit_error = Some(SUBMIT_FAILED.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    async fn save_new(&self) -> AppResult<Book> {
        let created = self.api.create_book(&self.form).await?;
        tracing::info!("Created book id={} ({})", created.id, created.title);
        self.mount.store().dispatch(BookAction::Create(created.clone()));
        Ok(created)
    }

    async fn save_existing(&self, id: String) -> AppResult<Book> {
        let book = self.form.clone().into_book(id)?;
        let updated = self.api.update_book(&book).await?;
        tracing::info!("Updated book id={}", updated.id);
        self.mount.store().dispatch(BookAction::Update(updated.clone()));
        Ok(updated)
    }

    pub fn render(&self) -> String {
        if self.is_loading() {
            return "Loading book data...".to_string();
        }

        let (heading, button) = match self.mode {
            FormMode::Add => ("Add Book", "Add Book"),
            FormMode::Edit(_) => ("Edit Book", "Update Book"),
        };

        let mut out = format!("{}\n\n", heading);
        for field in BookField::ALL {
            let value = match field {
                BookField::Isbn => self.form.isbn.clone(),
                BookField::Title => self.form.title.clone(),
                BookField::Subtitle => self.form.subtitle.clone(),
                BookField::CopyrightYear => self.form.copyright_year.clone(),
                BookField::Status => self
                    .form
                    .status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Select status".to_string()),
            };
            out.push_str(&format!("{:<16}{}\n", field.label(), value));
            if let Some(error) = self.error(field) {
                out.push_str(&format!("  ! {}\n", error));
            }
        }

        if let Some(error) = &self.submit_error {
            out.push_str(&format!("\n{}\n", error));
        }
        out.push_str(&format!("\n[{}]", button));
        out
    }
}
