//! Remote service access and data loading

pub mod api;
pub mod loader;

pub use api::{BooksApi, HttpBooksApi};
pub use loader::{BooksLoader, BooksMount};
