//! Application Errors
//!
//! One error type shared by the API client, the payment flow and the
//! form handlers. Every variant renders as a message fit for a toast.

use serde::Deserialize;
use thiserror::Error;

/// Common result type for fallible operations
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// 401 from the backend, or no credential to send
    #[error("Your session has expired, please log in again")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Caught before anything was submitted
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response; the backend's message is shown verbatim
    #[error("{0}")]
    Rejected(String),

    /// 2xx response whose body does not match the expected schema
    #[error("Unexpected response from {endpoint}: {detail}")]
    SchemaMismatch { endpoint: String, detail: String },

    #[error("Storage error: {0}")]
    Storage(String),

    /// The checkout widget was closed without paying
    #[error("Payment cancelled")]
    Cancelled,
}

const GENERIC_REJECTION: &str = "Something went wrong, please try again";

/// Error bodies seen from the backend: `{ "message": ... }` or `{ "error": ... }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl AppError {
    /// Map a non-2xx status and its raw body to an error.
    pub fn from_status(status: u16, endpoint: &str, body: &str) -> Self {
        match status {
            401 => AppError::Unauthorized,
            404 => AppError::NotFound(
                backend_message(body).unwrap_or_else(|| endpoint.to_string()),
            ),
            _ => AppError::Rejected(
                backend_message(body).unwrap_or_else(|| GENERIC_REJECTION.to_string()),
            ),
        }
    }

    pub fn schema(endpoint: &str, err: impl std::fmt::Display) -> Self {
        AppError::SchemaMismatch {
            endpoint: endpoint.to_string(),
            detail: err.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

fn backend_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}
