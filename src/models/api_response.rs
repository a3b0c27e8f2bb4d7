//! Response envelope used by every books endpoint

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `{ success, message, data, error }` wrapper around each payload
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, failing when the server sent none
    pub fn into_data(self) -> AppResult<T> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(AppError::InvalidResponse(
                self.error
                    .or(self.message)
                    .unwrap_or_else(|| "response carries no data".to_string()),
            )),
        }
    }
}
