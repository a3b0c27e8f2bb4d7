//! Book model and related request types.
//!
//! The books service stores `id` and `copyrightYear` as integers; the client
//! treats both as opaque strings and accepts either JSON representation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::enums::BookStatus;
use crate::error::{AppError, AppResult};

/// Catalog record as returned by the books service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub subtitle: String,
    #[serde(deserialize_with = "string_or_number")]
    pub copyright_year: String,
    pub status: BookStatus,
}

impl Book {
    /// Editable fields of this book, without its id
    pub fn form_data(&self) -> BookFormData {
        BookFormData {
            isbn: self.isbn.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            copyright_year: self.copyright_year.clone(),
            status: Some(self.status),
        }
    }
}

/// Candidate book as edited in a form (no id yet).
///
/// Also the request body of the create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookFormData {
    #[validate(custom(function = "crate::validation::validate_isbn"))]
    pub isbn: String,
    #[validate(custom(function = "crate::validation::validate_title"))]
    pub title: String,
    #[validate(custom(function = "crate::validation::validate_subtitle"))]
    pub subtitle: String,
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "Copyright year is required"))]
    pub copyright_year: String,
    /// `None` while no status has been selected
    #[validate(required(message = "Status is required"))]
    pub status: Option<BookStatus>,
}

impl Default for BookFormData {
    fn default() -> Self {
        Self {
            isbn: String::new(),
            title: String::new(),
            subtitle: String::new(),
            copyright_year: String::new(),
            status: Some(BookStatus::Pending),
        }
    }
}

impl BookFormData {
    /// Attach an id, producing the full record sent on update
    pub fn into_book(self, id: impl Into<String>) -> AppResult<Book> {
        let status = self
            .status
            .ok_or_else(|| AppError::Validation("Status is required".to_string()))?;
        Ok(Book {
            id: id.into(),
            isbn: self.isbn,
            title: self.title,
            subtitle: self.subtitle,
            copyright_year: self.copyright_year,
            status,
        })
    }
}

/// Body of the update endpoint (`PATCH /api/books`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub subtitle: String,
    pub copyright_year: String,
    pub status: BookStatus,
}

impl From<&Book> for UpdateBookRequest {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            subtitle: book.subtitle.clone(),
            copyright_year: book.copyright_year.clone(),
            status: book.status,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Num(n) => n.to_string(),
    })
}
