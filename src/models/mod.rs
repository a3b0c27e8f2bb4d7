//! Data models for Elidune Books

pub mod api_response;
pub mod book;
pub mod enums;

// Re-export commonly used types
pub use api_response::ApiResponse;
pub use book::{Book, BookFormData, UpdateBookRequest};
pub use enums::BookStatus;
