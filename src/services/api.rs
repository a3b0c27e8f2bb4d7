//! Books REST service client
//!
//! Every response is wrapped in an [`ApiResponse`] envelope; the client
//! returns the unwrapped payload. Non-2xx answers and transport failures are
//! returned as [`AppError`]s carrying a readable message. There is no retry
//! and no timeout beyond the transport default.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::{ApiResponse, Book, BookFormData, UpdateBookRequest},
};

/// Operations offered by the books service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksApi: Send + Sync {
    /// `GET /api/books`
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    /// `GET /api/books/{id}`
    async fn get_book(&self, id: &str) -> AppResult<Book>;

    /// `GET /api/books/search?query={query}`
    async fn search_books(&self, query: &str) -> AppResult<Vec<Book>>;

    /// `POST /api/books`; the server assigns the id
    async fn create_book(&self, book: &BookFormData) -> AppResult<Book>;

    /// `PATCH /api/books`
    async fn update_book(&self, book: &Book) -> AppResult<Book>;

    /// `DELETE /api/books/{id}`
    async fn delete_book(&self, id: &str) -> AppResult<()>;
}

/// [`BooksApi`] over HTTP
#[derive(Clone)]
pub struct HttpBooksApi {
    client: Client,
    base_url: Url,
}

impl HttpBooksApi {
    /// Create a client for the books resource at `base_url`
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{base_url}/search?query=...` with spaces sent as `%20`
    fn search_url(&self, query: &str) -> AppResult<Url> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut().append_pair("query", query);
        // Form encoding turns spaces into `+` and a literal `+` into `%2B`
        let encoded = url.query().map(|q| q.replace('+', "%20"));
        url.set_query(encoded.as_deref());
        Ok(url)
    }

    /// Turn a non-2xx response into an error, preferring the envelope's `error` text
    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Could not read error body ({}): {}", status, e);
                String::new()
            }
        };
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.error.or(envelope.message))
            .filter(|m| !m.trim().is_empty())
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("No error details")
                    .to_string()
            });

        tracing::debug!("Books service answered {}: {}", status, message);

        if status == StatusCode::NOT_FOUND {
            Err(AppError::NotFound(message))
        } else {
            Err(AppError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn unwrap_envelope<T>(response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = Self::check_status(response).await?;
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))?;
        envelope.into_data()
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let url = self.endpoint(&[])?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn get_book(&self, id: &str) -> AppResult<Book> {
        let url = self.endpoint(&[id])?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        let url = self.search_url(query)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn create_book(&self, book: &BookFormData) -> AppResult<Book> {
        let url = self.endpoint(&[])?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(book).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn update_book(&self, book: &Book) -> AppResult<Book> {
        let url = self.endpoint(&[])?;
        tracing::debug!("PATCH {} id={}", url, book.id);
        let request = UpdateBookRequest::from(book);
        let response = self.client.patch(url).json(&request).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn delete_book(&self, id: &str) -> AppResult<()> {
        let url = self.endpoint(&[id])?;
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
