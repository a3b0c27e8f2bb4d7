//! Field validation for book forms
//!
//! Every rule runs on each call and all failures are reported together, so the
//! validator can be re-run on each keystroke without keeping state.

use std::borrow::Cow;
use std::str::FromStr;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;
use crate::models::BookFormData;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const SUBTITLE_REQUIRED: &str = "Subtitle is required";
pub const ISBN_REQUIRED: &str = "ISBN is required";
pub const ISBN_LENGTH: &str = "ISBN must be 10 or 13 characters";
pub const COPYRIGHT_YEAR_REQUIRED: &str = "Copyright year is required";
pub const STATUS_REQUIRED: &str = "Status is required";

/// Editable book field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookField {
    Isbn,
    Title,
    Subtitle,
    CopyrightYear,
    Status,
}

impl BookField {
    /// Form order
    pub const ALL: [BookField; 5] = [
        BookField::Isbn,
        BookField::Title,
        BookField::Subtitle,
        BookField::CopyrightYear,
        BookField::Status,
    ];

    /// Field name as used by the validator (Rust field name)
    pub fn name(&self) -> &'static str {
        match self {
            BookField::Isbn => "isbn",
            BookField::Title => "title",
            BookField::Subtitle => "subtitle",
            BookField::CopyrightYear => "copyright_year",
            BookField::Status => "status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookField::Isbn => "ISBN",
            BookField::Title => "Title",
            BookField::Subtitle => "Subtitle",
            BookField::CopyrightYear => "Copyright Year",
            BookField::Status => "Status",
        }
    }
}

impl FromStr for BookField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isbn" => Ok(BookField::Isbn),
            "title" => Ok(BookField::Title),
            "subtitle" => Ok(BookField::Subtitle),
            "copyrightYear" | "copyright_year" => Ok(BookField::CopyrightYear),
            "status" => Ok(BookField::Status),
            _ => Err(AppError::Validation(format!("Unknown book field '{}'", s))),
        }
    }
}

/// Per-field validation messages; a `None` slot means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookErrors {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub copyright_year: Option<String>,
    pub status: Option<String>,
}

impl BookErrors {
    pub fn is_empty(&self) -> bool {
        BookField::ALL.iter().all(|field| self.get(*field).is_none())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn get(&self, field: BookField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: BookField, message: Option<String>) {
        *self.slot_mut(field) = message;
    }

    /// Failing fields with their messages, in form order
    pub fn iter(&self) -> impl Iterator<Item = (BookField, &str)> + '_ {
        BookField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|message| (field, message)))
    }

    fn slot(&self, field: BookField) -> &Option<String> {
        match field {
            BookField::Isbn => &self.isbn,
            BookField::Title => &self.title,
            BookField::Subtitle => &self.subtitle,
            BookField::CopyrightYear => &self.copyright_year,
            BookField::Status => &self.status,
        }
    }

    fn slot_mut(&mut self, field: BookField) -> &mut Option<String> {
        match field {
            BookField::Isbn => &mut self.isbn,
            BookField::Title => &mut self.title,
            BookField::Subtitle => &mut self.subtitle,
            BookField::CopyrightYear => &mut self.copyright_year,
            BookField::Status => &mut self.status,
        }
    }
}

impl From<ValidationErrors> for BookErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut book_errors = BookErrors::default();
        for (name, field_errors) in errors.field_errors() {
            let name: &str = name.as_ref();
            let Ok(field) = name.parse::<BookField>() else {
                continue;
            };
            let message = field_errors
                .first()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                });
            book_errors.set(field, message);
        }
        book_errors
    }
}

/// Validate a candidate book, returning an entry for each failing field
pub fn validate_book(book: &BookFormData) -> BookErrors {
    match book.validate() {
        Ok(()) => BookErrors::default(),
        Err(errors) => BookErrors::from(errors),
    }
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(error_with_message("required", TITLE_REQUIRED));
    }
    Ok(())
}

pub(crate) fn validate_subtitle(subtitle: &str) -> Result<(), ValidationError> {
    if subtitle.trim().is_empty() {
        return Err(error_with_message("required", SUBTITLE_REQUIRED));
    }
    Ok(())
}

/// Presence is checked on the trimmed value, length on the raw one
pub(crate) fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    if isbn.trim().is_empty() {
        return Err(error_with_message("required", ISBN_REQUIRED));
    }
    let length = isbn.chars().count();
    if length != 10 && length != 13 {
        return Err(error_with_message("length", ISBN_LENGTH));
    }
    Ok(())
}
