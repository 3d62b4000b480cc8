use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Backend error {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return RepositoryError::ConnectionError(err.to_string());
        }

        if err.is_decode() {
            return RepositoryError::SerializationError(err.to_string());
        }

        if let Some(status) = err.status() {
            return RepositoryError::Backend {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }

        RepositoryError::Unexpected(format!("Unexpected http error: {err}"))
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

impl From<crate::domain::types::TypeConstraintError> for RepositoryError {
    fn from(err: crate::domain::types::TypeConstraintError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}
