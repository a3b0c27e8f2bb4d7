//! Client-side book state
//!
//! `BooksState` only changes through [`BookAction`]s applied by
//! [`BooksState::reduce`], which always builds a new state and leaves the
//! previous snapshot untouched. [`BookStore`] is the single per-application
//! container that holds the current state and notifies subscribers.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::models::Book;

/// Books currently known to the client plus the status of the last fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooksState {
    pub books: Vec<Book>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Named transitions of [`BooksState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookAction {
    FetchStart,
    FetchSuccess(Vec<Book>),
    FetchFailure(String),
    Create(Book),
    Update(Book),
    Delete(String),
}

impl BookAction {
    pub fn name(&self) -> &'static str {
        match self {
            BookAction::FetchStart => "fetch-start",
            BookAction::FetchSuccess(_) => "fetch-success",
            BookAction::FetchFailure(_) => "fetch-failure",
            BookAction::Create(_) => "create",
            BookAction::Update(_) => "update",
            BookAction::Delete(_) => "delete",
        }
    }
}

impl BooksState {
    /// Apply `action` and return the resulting state.
    ///
    /// `Update` and `Delete` for an id that is not present leave the books
    /// unchanged without reporting anything.
    pub fn reduce(&self, action: BookAction) -> BooksState {
        match action {
            BookAction::FetchStart => BooksState {
                books: self.books.clone(),
                loading: true,
                error: None,
            },
            BookAction::FetchSuccess(books) => BooksState {
                books,
                loading: false,
                error: None,
            },
            BookAction::FetchFailure(message) => BooksState {
                books: self.books.clone(),
                loading: false,
                error: Some(message),
            },
            BookAction::Create(book) => {
                let mut next = self.clone();
                if self.books.iter().any(|b| b.id == book.id) {
                    tracing::warn!("Ignoring create for already known book id={}", book.id);
                } else {
                    next.books.push(book);
                }
                next
            }
            BookAction::Update(book) => {
                let mut next = self.clone();
                if let Some(slot) = next.books.iter_mut().find(|b| b.id == book.id) {
                    *slot = book;
                }
                next
            }
            BookAction::Delete(id) => BooksState {
                books: self.books.iter().filter(|b| b.id != id).cloned().collect(),
                loading: self.loading,
                error: self.error.clone(),
            },
        }
    }

    /// Find a book by id, falling back to its ISBN
    pub fn find(&self, id_or_isbn: &str) -> Option<&Book> {
        self.books
            .iter()
            .find(|b| b.id == id_or_isbn)
            .or_else(|| self.books.iter().find(|b| b.isbn == id_or_isbn))
    }
}

/// Shared handle on the application's book state.
///
/// Clones refer to the same state. Transitions are serialized through the
/// underlying watch channel.
#[derive(Clone)]
pub struct BookStore {
    sender: Arc<watch::Sender<BooksState>>,
}

impl BookStore {
    /// Create a store in the initial state (no books, not loading, no error)
    pub fn new() -> Self {
        Self::with_state(BooksState::default())
    }

    /// Create a store preloaded with `state`
    pub fn with_state(state: BooksState) -> Self {
        let (sender, _) = watch::channel(state);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply a transition to the current state and notify subscribers
    pub fn dispatch(&self, action: BookAction) {
        tracing::debug!(action = action.name(), "dispatch");
        self.sender.send_modify(|state| {
            let next = state.reduce(action);
            *state = next;
        });
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> BooksState {
        self.sender.borrow().clone()
    }

    /// Look up a book in the latest state by id or ISBN
    pub fn find(&self, id_or_isbn: &str) -> Option<Book> {
        self.sender.borrow().find(id_or_isbn).cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<BooksState> {
        self.sender.subscribe()
    }

    /// Stream of states, starting with the current one
    pub fn changes(&self) -> WatchStream<BooksState> {
        WatchStream::new(self.subscribe())
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}
