//! User domain model.
//!
//! Users are the primary identity entities in Keycloak.
//! They belong to a realm and carry attributes, required actions and an
//! optional link to the federation provider that materialized them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Keycloak user.
///
/// Role grants are not stored on the user itself; they live in the user
/// store and are managed through `UserProvider::grant_role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    // === Identity ===
    /// Unique identifier.
    pub id: Uuid,
    /// Realm this user belongs to.
    pub realm_id: Uuid,
    /// Unique username within the realm.
    pub username: String,
    /// Whether the user account is enabled.
    pub enabled: bool,

    // === Profile ===
    /// User's first name.
    pub first_name: Option<String>,
    /// User's last name.
    pub last_name: Option<String>,
    /// User's email address.
    pub email: Option<String>,
    /// Whether the email has been verified.
    pub email_verified: bool,

    // === Timestamps ===
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,

    // === Federation ===
    /// Identifier of the federation provider that created this user.
    pub federation_link: Option<String>,

    // === Required Actions ===
    /// Pending required actions (e.g., `UPDATE_PASSWORD`).
    pub required_actions: Vec<String>,

    // === Custom Attributes ===
    /// Custom user attributes.
    pub attributes: HashMap<String, Vec<String>>,
}

impl User {
    /// Creates a new user with the given username.
    #[must_use]
    pub fn new(realm_id: Uuid, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            realm_id,
            username: username.into(),
            enabled: true,
            first_name: None,
            last_name: None,
            email: None,
            email_verified: false,
            created_at: now,
            updated_at: now,
            federation_link: None,
            required_actions: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the user's email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the user's first name.
    #[must_use]
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the user's last name.
    #[must_use]
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Links the user to a federation provider.
    #[must_use]
    pub fn with_federation_link(mut self, provider_id: impl Into<String>) -> Self {
        self.federation_link = Some(provider_id.into());
        self
    }

    /// Gets the user's full name.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// Checks if this is a federated user.
    #[must_use]
    pub const fn is_federated(&self) -> bool {
        self.federation_link.is_some()
    }

    /// Checks if the user has a specific required action.
    #[must_use]
    pub fn has_required_action(&self, action: &str) -> bool {
        self.required_actions.iter().any(|a| a == action)
    }

    /// Adds a required action. Adding an action that is already pending
    /// leaves the list unchanged.
    pub fn add_required_action(&mut self, action: impl Into<String>) {
        let action = action.into();
        if !self.has_required_action(&action) {
            self.required_actions.push(action);
        }
    }

    /// Gets an attribute value.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Vec<String>> {
        self.attributes.get(name)
    }

    /// Gets the first value of an attribute.
    #[must_use]
    pub fn get_first_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Sets an attribute value.
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.attributes.insert(name.into(), values);
    }

    /// Replaces an attribute with a single value.
    pub fn set_single_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), vec![value.into()]);
    }

    /// Bumps the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Common required action constants.
pub mod required_actions {
    /// User must update their password.
    pub const UPDATE_PASSWORD: &str = "UPDATE_PASSWORD";
    /// User must verify their email.
    pub const VERIFY_EMAIL: &str = "VERIFY_EMAIL";
    /// User must update their profile.
    pub const UPDATE_PROFILE: &str = "UPDATE_PROFILE";
}
