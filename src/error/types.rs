// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Source error: {0}")]
    Source(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::Io(err.into())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_error_message() {
        let err = AppError::Pool("timed out".to_string());
        assert_eq!(err.to_string(), "Pool error: timed out");
    }

    #[test]
    fn test_database_error_is_preserved() {
        let err: AppError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(
            err,
            AppError::Database(rusqlite::Error::QueryReturnedNoRows)
        ));
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: AppError = DomainError::InvariantViolation("empty title".to_string()).into();
        assert_eq!(err.to_string(), "Domain error: Invariant violation: empty title");
    }
}
