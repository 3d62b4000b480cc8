//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email) so that once a value reaches the domain layer it
//! can be treated as trusted.
use std::fmt::{Display, Formatter};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AcademyId, "Unique identifier for an academy (tenant).");
id_newtype!(BranchId, "Unique identifier for a branch.");
id_newtype!(LabId, "Unique identifier for a lab room.");
id_newtype!(StudentId, "Unique identifier for a student.");
id_newtype!(LecturerId, "Unique identifier for a lecturer.");
id_newtype!(EmployeeId, "Unique identifier for an employee.");
id_newtype!(CourseId, "Unique identifier for a course.");
id_newtype!(GroupId, "Unique identifier for a course group.");
id_newtype!(EnrollmentId, "Unique identifier for an enrollment.");
id_newtype!(LectureId, "Unique identifier for a lecture.");
id_newtype!(ReceiptId, "Unique identifier for a receipt.");
id_newtype!(TemplateId, "Unique identifier for a message template.");
id_newtype!(LookupId, "Unique identifier for a lookup row.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Phone number normalized to E.164.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Parses and normalizes a phone number string.
    pub fn new<S: AsRef<str>>(phone: S) -> Result<Self, TypeConstraintError> {
        let parsed = parse(None, phone.as_ref()).map_err(|_| TypeConstraintError::InvalidPhone)?;
        if !phonenumber::is_valid(&parsed) {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(Self(parsed.format().mode(Mode::E164).to_string()))
    }

    /// Borrow the phone number as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Phone {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trimmed, non-empty display name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntityName(String);

impl EntityName {
    /// Trims the input and rejects empty strings.
    pub fn new<S: Into<String>>(name: S) -> Result<Self, TypeConstraintError> {
        let trimmed = name.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the name as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EntityName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EntityName {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EntityName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-form text sanitized against HTML injection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Strips dangerous markup and trims the input.
    pub fn new<S: AsRef<str>>(text: S) -> Self {
        Self(ammonia::clean(text.as_ref()).trim().to_string())
    }

    /// Borrow the text as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns true when nothing survived sanitization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for SanitizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SanitizedText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_newtype_rejects_non_positive() {
        assert!(StudentId::new(1).is_ok());
        assert_eq!(StudentId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(AcademyId::new(-5), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn test_email_normalizes() {
        let email = Email::new("  Admin@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "admin@example.com");
        assert!(Email::new("not-an-email").is_err());
    }

    #[test]
    fn test_entity_name_trims_and_rejects_empty() {
        let name = EntityName::new("  Ada Lovelace ").unwrap();
        assert_eq!(name.as_str(), "Ada Lovelace");
        assert_eq!(EntityName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn test_sanitized_text_strips_markup() {
        let text = SanitizedText::new("hello <script>alert(1)</script> world");
        assert!(!text.as_str().contains("script"));
        assert!(text.as_str().contains("hello"));
    }
}
