//! Federation error types.
//!
//! Credential validation outcomes (wrong kind, no structural match) are
//! reported as `Ok(false)`, not as errors. Errors are reserved for
//! configuration problems and failures of the local user store.

use kc_storage::StorageError;
use thiserror::Error;

/// Errors that can occur during federation operations.
#[derive(Debug, Error)]
pub enum FederationError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The local store refused to create a federated user.
    #[error("Failed to create user '{username}': {source}")]
    UserCreation {
        /// Username that could not be created.
        username: String,
        /// Underlying storage failure.
        #[source]
        source: StorageError,
    },

    /// Storage error when persisting federated users.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl FederationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a user creation error.
    #[must_use]
    pub fn user_creation(username: impl Into<String>, source: StorageError) -> Self {
        Self::UserCreation {
            username: username.into(),
            source,
        }
    }

    /// Checks if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Checks if this is a user creation error.
    #[must_use]
    pub const fn is_creation_error(&self) -> bool {
        matches!(self, Self::UserCreation { .. })
    }
}

/// Result type for federation operations.
pub type FederationResult<T> = Result<T, FederationError>;
