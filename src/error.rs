//! Error types for the API client and favorites storage.

use thiserror::Error;

/// Failure talking to the character API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The API answers 404 when a listing query matches nothing.
    #[error("no results")]
    NotFound,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(String),
    #[error("response parse error: {0}")]
    Decode(String),
    #[error("background task failed: {0}")]
    Task(String),
}

impl ApiError {
    pub fn from_status(status: u16) -> Self {
        if status == 404 {
            ApiError::NotFound
        } else {
            ApiError::Status(status)
        }
    }
}

/// Failure reading or writing persisted favorites.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_special_cased() {
        assert_eq!(ApiError::from_status(404), ApiError::NotFound);
        assert_eq!(ApiError::from_status(500), ApiError::Status(500));
        assert_eq!(ApiError::from_status(429).to_string(), "unexpected status 429");
    }
}
