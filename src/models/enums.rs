//! Shared domain enums

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// BookStatus
// ---------------------------------------------------------------------------

/// Review state of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    Pending,
    Rejected,
    Approved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [BookStatus::Pending, BookStatus::Rejected, BookStatus::Approved];

    /// Wire representation (`PENDING`, `REJECTED`, `APPROVED`)
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Pending => "PENDING",
            BookStatus::Rejected => "REJECTED",
            BookStatus::Approved => "APPROVED",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Pending => "Pending",
            BookStatus::Rejected => "Rejected",
            BookStatus::Approved => "Approved",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for BookStatus {
    type Err = AppError;

    /// Accepts the wire name in any letter case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid status '{}', expected one of PENDING, REJECTED, APPROVED",
                    s
                ))
            })
    }
}
