//! Storage error types.
//!
//! Stores scope every row to a realm. Lookups report absence as `Ok(None)`;
//! [`StorageError::NotFound`] is only returned by writes that target a row
//! which must already exist (updates, deletes, role grants).

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the local user and role stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A write referenced a row the realm does not contain.
    #[error("{entity_type} {id} does not exist in the realm")]
    NotFound {
        /// Kind of row ("User" or "Role").
        entity_type: &'static str,
        /// Id of the missing row.
        id: Uuid,
    },

    /// A per-realm uniqueness constraint was violated.
    ///
    /// Usernames and role names are unique within a realm.
    #[error("{entity_type} with {field} '{value}' already exists in the realm")]
    Duplicate {
        /// Kind of row.
        entity_type: &'static str,
        /// Unique field.
        field: &'static str,
        /// Value already taken.
        value: String,
    },

    /// The row failed validation before being written.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Creates a not found error for a row.
    #[must_use]
    pub const fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }

    /// Creates a uniqueness violation.
    #[must_use]
    pub fn duplicate(
        entity_type: &'static str,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            entity_type,
            field,
            value: value.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Checks if a write targeted a missing row.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if a uniqueness constraint was violated.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
