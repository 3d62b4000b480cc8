//! Orchestration layer between routes and the repository.
//!
//! Every function takes the repository as a generic trait bound so tests can
//! substitute the mockall repository.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::models::auth::{AuthenticatedUser, check_role};
use crate::repository::errors::RepositoryError;

pub mod branches;
pub mod course_groups;
pub mod courses;
pub mod employees;
pub mod lectures;
pub mod lecturers;
pub mod lookups;
pub mod main;
pub mod messages;
pub mod receipts;
pub mod schedule;
pub mod students;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Rejects users lacking `role` with [`ServiceError::Unauthorized`].
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
