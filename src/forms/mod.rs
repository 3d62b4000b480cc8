//! Form definitions backing the routes.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::schedule::ScheduleError;
use crate::domain::types::TypeConstraintError;

pub mod branches;
pub mod course_groups;
pub mod courses;
pub mod employees;
pub mod lectures;
pub mod lecturers;
pub mod lookups;
pub mod messages;
pub mod receipts;
pub mod students;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid time")]
    InvalidTime,

    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("mismatched fields: {0}")]
    Mismatch(String),
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::InvalidPhone => FormError::InvalidPhoneNumber,
            TypeConstraintError::EmptyString => FormError::InvalidName,
            TypeConstraintError::NonPositiveId => FormError::InvalidId,
            TypeConstraintError::InvalidValue(message) => FormError::InvalidChoice(message),
        }
    }
}

/// Parses an HTML `date` input value.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FormError::InvalidDate)
}

/// Parses an HTML `time` input value, with or without seconds.
pub(crate) fn parse_time(value: &str) -> Result<NaiveTime, FormError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime)
}

/// Maps an empty or whitespace-only optional field to `None`.
pub(crate) fn none_if_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parses an optional HTML select that posts an empty string for "none".
pub(crate) fn optional_id(value: Option<i32>) -> Option<i32> {
    value.filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_and_time() {
        assert!(parse_date("2025-09-06").is_ok());
        assert!(parse_date("06/09/2025").is_err());
        assert!(parse_time("17:00").is_ok());
        assert!(parse_time("17:00:30").is_ok());
        assert!(parse_time("5pm").is_err());
    }

    #[test]
    fn test_none_if_blank() {
        assert_eq!(none_if_blank(Some("  ".to_string())), None);
        assert_eq!(none_if_blank(None), None);
        assert_eq!(
            none_if_blank(Some(" x ".to_string())),
            Some("x".to_string())
        );
    }
}
