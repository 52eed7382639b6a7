//! Identifier and validated scalar types for the user domain.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum external subject length stored in a `VARCHAR(255)` column.
pub const MAX_EXTERNAL_ID_LENGTH: usize = 255;

/// Maximum email length stored in a `VARCHAR(320)` column.
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps an existing identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUserId`] for a blank value.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserDomainError::EmptyUserId);
        }
        Ok(Self(value))
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subject identifier issued by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    /// Creates a validated external identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyExternalId`] for a blank value or
    /// [`UserDomainError::ExternalIdTooLong`] past
    /// [`MAX_EXTERNAL_ID_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyExternalId);
        }
        let len = trimmed.chars().count();
        if len > MAX_EXTERNAL_ID_LENGTH {
            return Err(UserDomainError::ExternalIdTooLong {
                max: MAX_EXTERNAL_ID_LENGTH,
                len,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address with a non-empty local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] when the value lacks a local
    /// part, a domain, or contains whitespace, and
    /// [`UserDomainError::EmailTooLong`] past [`MAX_EMAIL_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            })
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }
        let len = normalized.chars().count();
        if len > MAX_EMAIL_LENGTH {
            return Err(UserDomainError::EmailTooLong {
                max: MAX_EMAIL_LENGTH,
                len,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
