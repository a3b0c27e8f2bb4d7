//! In-memory books service speaking the same JSON envelope as the real one

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use elidune_books::{services::HttpBooksApi, AppConfig, AppState};

type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
pub struct Backend {
    books: Mutex<Vec<Value>>,
    next_id: AtomicU64,
    list_calls: AtomicUsize,
    fail_list: AtomicBool,
}

impl Backend {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Make `GET /api/books` answer 500
    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn book_count(&self) -> usize {
        self.books.lock().unwrap().len()
    }

    /// Store a book; `id` and `copyrightYear` are kept as numbers
    pub fn insert(&self, isbn: &str, title: &str, subtitle: &str, year: i64, status: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.books.lock().unwrap().push(json!({
            "id": id,
            "isbn": isbn,
            "title": title,
            "subtitle": subtitle,
            "copyrightYear": year,
            "status": status,
        }));
        id
    }
}

pub struct TestServer {
    pub backend: Arc<Backend>,
    pub base_url: String,
}

impl TestServer {
    pub fn api(&self) -> HttpBooksApi {
        HttpBooksApi::new(&self.base_url).unwrap()
    }

    pub fn app_state(&self) -> AppState {
        let mut config = AppConfig::default();
        config.api.base_url = self.base_url.clone();
        AppState::new(config).unwrap()
    }
}

/// Start the service on an ephemeral port with three books
pub async fn spawn_server() -> TestServer {
    let backend = Arc::new(Backend::default());
    backend.insert("1234567890", "Dune", "Book One", 1965, "APPROVED");
    backend.insert("9780000000001", "Emma", "A Novel", 1815, "PENDING");
    backend.insert("9780000000002", "Ulysses", "Annotated", 1922, "REJECTED");

    let app = Router::new()
        .route("/api/books", get(list_books).post(create_book).patch(update_book))
        .route("/api/books/search", get(search_books))
        .route("/api/books/:id", get(get_book).delete(delete_book))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        backend,
        base_url: format!("http://{}/api/books", addr),
    }
}

fn ok(status: StatusCode, message: Option<&str>, data: Option<Value>) -> Reply {
    let mut body = json!({ "success": true });
    if let Some(message) = message {
        body["message"] = json!(message);
    }
    if let Some(data) = data {
        body["data"] = data;
    }
    (status, Json(body))
}

fn fail(status: StatusCode, error: &str) -> Reply {
    (status, Json(json!({ "success": false, "error": error })))
}

fn same_id(book: &Value, id: &str) -> bool {
    book["id"].to_string() == id
}

/// Incoming `copyrightYear` may be a string; store it as a number
fn normalize(mut book: Value) -> Value {
    if let Some(year) = book["copyrightYear"].as_str().and_then(|y| y.parse::<i64>().ok()) {
        book["copyrightYear"] = json!(year);
    }
    book
}

async fn list_books(State(backend): State<Arc<Backend>>) -> Reply {
    backend.list_calls.fetch_add(1, Ordering::SeqCst);
    if backend.fail_list.load(Ordering::SeqCst) {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get books");
    }
    let books = backend.books.lock().unwrap().clone();
    ok(StatusCode::OK, None, Some(Value::Array(books)))
}

async fn get_book(State(backend): State<Arc<Backend>>, Path(id): Path<String>) -> Reply {
    let books = backend.books.lock().unwrap();
    match books.iter().find(|b| same_id(b, &id)) {
        Some(book) => ok(StatusCode::OK, None, Some(book.clone())),
        None => fail(StatusCode::NOT_FOUND, "Book not found"),
    }
}

async fn search_books(
    State(backend): State<Arc<Backend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let query = match params.get("query").filter(|q| !q.is_empty()) {
        Some(q) => q.to_lowercase(),
        None => return fail(StatusCode::BAD_REQUEST, "Query parameter is required"),
    };

    let books = backend.books.lock().unwrap();
    let found: Vec<Value> = books
        .iter()
        .filter(|b| {
            ["title", "subtitle", "isbn"].iter().any(|key| {
                b[*key]
                    .as_str()
                    .map(|v| v.to_lowercase().contains(&query))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect();
    ok(StatusCode::OK, None, Some(Value::Array(found)))
}

async fn create_book(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Reply {
    let mut book = normalize(body);
    {
        let books = backend.books.lock().unwrap();
        if books.iter().any(|b| b["isbn"] == book["isbn"]) {
            return fail(StatusCode::BAD_REQUEST, "A book with this ISBN already exists");
        }
    }
    let id = backend.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    book["id"] = json!(id);
    backend.books.lock().unwrap().push(book.clone());
    ok(StatusCode::CREATED, Some("Book created successfully"), Some(book))
}

async fn update_book(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Reply {
    let id = match &body["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut book = normalize(body);
    if let Ok(numeric) = id.parse::<u64>() {
        book["id"] = json!(numeric);
    }

    let mut books = backend.books.lock().unwrap();
    match books.iter_mut().find(|b| same_id(b, &id)) {
        Some(stored) => {
            *stored = book.clone();
            ok(StatusCode::OK, Some("Book updated successfully"), Some(book))
        }
        None => fail(StatusCode::NOT_FOUND, "Book not found"),
    }
}

async fn delete_book(State(backend): State<Arc<Backend>>, Path(id): Path<String>) -> Reply {
    let mut books = backend.books.lock().unwrap();
    let before = books.len();
    books.retain(|b| !same_id(b, &id));
    if books.len() == before {
        return fail(StatusCode::NOT_FOUND, "Book not found");
    }
    ok(StatusCode::OK, Some("Book deleted successfully"), None)
}
