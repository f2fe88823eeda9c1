use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod contact;

/// Domain error taxonomy surfaced by service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Contact not found")]
    NotFound,

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    InvalidRoleTransition(String),

    /// Another request updated the record between read and write.
    #[error("Contact was modified by another request")]
    StaleRecord,

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Stale => ServiceError::StaleRecord,
            other => ServiceError::Repository(other),
        }
    }
}
