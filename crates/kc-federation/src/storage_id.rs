//! Composite identifiers for federated users.
//!
//! A federated user id has the form `f:<provider-id>:<external-id>`.
//! Ids without the `f:` prefix belong to local storage and are their own
//! external id.

use std::fmt;

const FEDERATED_PREFIX: &str = "f:";

/// A user id split into its provider and external parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageId {
    provider_id: Option<String>,
    external_id: String,
}

impl StorageId {
    /// Creates a federated id for a provider instance.
    #[must_use]
    pub fn new(provider_id: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            provider_id: Some(provider_id.into()),
            external_id: external_id.into(),
        }
    }

    /// Parses a user id.
    ///
    /// An id carrying the `f:` prefix but no second separator is treated as
    /// a local id.
    #[must_use]
    pub fn parse(id: &str) -> Self {
        if let Some(rest) = id.strip_prefix(FEDERATED_PREFIX) {
            if let Some((provider_id, external_id)) = rest.split_once(':') {
                return Self::new(provider_id, external_id);
            }
        }

        Self {
            provider_id: None,
            external_id: id.to_string(),
        }
    }

    /// Returns the provider id, if the id is federated.
    #[must_use]
    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    /// Returns the id within the external store.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Checks whether the id belongs to local storage.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        self.provider_id.is_none()
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provider_id {
            Some(provider_id) => write!(f, "{FEDERATED_PREFIX}{provider_id}:{}", self.external_id),
            None => f.write_str(&self.external_id),
        }
    }
}
