//! Shared primitives for all Rust crates in the spaces workspace.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across spaces crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier of the space every installation starts with.
pub const DEFAULT_SPACE_ID: &str = "default";

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Space identifier used to scope privilege grants and content.
///
/// Identifiers are lowercase ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpaceId(String);

impl SpaceId {
    /// Creates a validated space identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::Validation(
                "space id must not be empty".to_owned(),
            ));
        }

        if !value
            .chars()
            .all(|character| matches!(character, 'a'..='z' | '0'..='9' | '_' | '-'))
        {
            return Err(AppError::Validation(format!(
                "space id '{value}' must contain only lowercase letters, digits, '_' and '-'"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the identifier of the default space.
    #[must_use]
    pub fn default_space() -> Self {
        Self(DEFAULT_SPACE_ID.to_owned())
    }

    /// Returns true for the default space.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SPACE_ID
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for SpaceId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpaceId> for String {
    fn from(value: SpaceId) -> Self {
        value.0
    }
}

impl Display for SpaceId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Operation is not possible in the current workflow state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{NonEmptyString, SpaceId};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn space_id_rejects_uppercase_and_spaces() {
        assert!(SpaceId::new("Marketing").is_err());
        assert!(SpaceId::new("my space").is_err());
        assert!(SpaceId::new("").is_err());
    }

    #[test]
    fn space_id_accepts_kebab_and_snake_case() {
        let space_id = SpaceId::new("team-a_2");
        assert!(space_id.is_ok());
        assert!(SpaceId::default_space().is_default());
    }

    #[test]
    fn space_id_deserialization_validates() {
        let parsed = serde_json::from_str::<SpaceId>("\"NOPE\"");
        assert!(parsed.is_err());

        let parsed = serde_json::from_str::<SpaceId>("\"marketing\"");
        assert_eq!(
            parsed.map(|space_id| space_id.to_string()).unwrap_or_default(),
            "marketing"
        );
    }
}
