//! Initial load of the book collection
//!
//! Each [`BooksLoader::mount`] issues exactly one list request. Reading the
//! state afterwards (re-rendering) never fetches again; mounting again does.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::task::JoinHandle;

use crate::{
    services::api::BooksApi,
    store::{BookAction, BookStore, BooksState},
};

#[derive(Clone)]
pub struct BooksLoader {
    api: Arc<dyn BooksApi>,
    store: BookStore,
}

impl BooksLoader {
    pub fn new(api: Arc<dyn BooksApi>, store: BookStore) -> Self {
        Self { api, store }
    }

    /// Start loading the collection for a newly mounted consumer.
    ///
    /// `FetchStart` is dispatched before this returns; the request itself runs
    /// on a spawned task. Must be called within a Tokio runtime.
    pub fn mount(&self) -> BooksMount {
        let alive = Arc::new(AtomicBool::new(true));
        self.store.dispatch(BookAction::FetchStart);

        let task = tokio::spawn(load_books(
            self.api.clone(),
            self.store.clone(),
            alive.clone(),
        ));

        BooksMount {
            store: self.store.clone(),
            alive,
            task: Some(task),
        }
    }
}

async fn load_books(api: Arc<dyn BooksApi>, store: BookStore, alive: Arc<AtomicBool>) {
    let result = api.list_books().await;

    if !alive.load(Ordering::Acquire) {
        tracing::debug!("Book list arrived after unmount, discarding it");
        return;
    }

    match result {
        Ok(books) => {
            tracing::info!("Loaded {} books", books.len());
            store.dispatch(BookAction::FetchSuccess(books));
        }
        Err(e) => {
            let message = e.fault_message();
            tracing::warn!("Failed to load books: {}", message);
            store.dispatch(BookAction::FetchFailure(message));
        }
    }
}

/// A mounted consumer of the book collection.
///
/// Dropping the mount marks it as gone: a fetch still in flight completes but
/// its result is not committed to the store, which then stays `loading` until
/// the next mount.
pub struct BooksMount {
    store: BookStore,
    alive: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl BooksMount {
    /// Current `{books, loading, error}`
    pub fn state(&self) -> BooksState {
        self.store.snapshot()
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    pub fn is_mounted(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Wait until the fetch started by this mount has completed
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Book loading task failed: {}", e);
            }
        }
    }

    /// Leave the store as it is; an in-flight fetch will not clear `loading`
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for BooksMount {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}
