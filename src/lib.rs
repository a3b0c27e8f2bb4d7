//! Elidune Books
//!
//! Client for the Elidune books REST service: list, search, create, edit and
//! delete catalog records, with client-side validation and a local state
//! container kept in sync with the service.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod ui;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use services::{BooksApi, BooksLoader, HttpBooksApi};
use store::BookStore;

/// Application state shared by every page.
///
/// Created once per application root and passed explicitly.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn BooksApi>,
    pub store: BookStore,
}

impl AppState {
    /// Build the state with an HTTP client for the configured service
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = HttpBooksApi::from_config(&config.api)?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    pub fn with_api(config: AppConfig, api: Arc<dyn BooksApi>) -> Self {
        Self {
            config: Arc::new(config),
            api,
            store: BookStore::new(),
        }
    }

    pub fn loader(&self) -> BooksLoader {
        BooksLoader::new(self.api.clone(), self.store.clone())
    }
}
