//! Role domain model.
//!
//! Realm roles are granted to users for role-based access control.
//! Federation providers only look roles up by name; they never create them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A realm role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier.
    pub id: Uuid,
    /// Role name (unique within the realm).
    pub name: String,
    /// Realm this role belongs to.
    pub realm_id: Uuid,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new realm role.
    #[must_use]
    pub fn new_realm_role(realm_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            realm_id,
            created_at: Utc::now(),
        }
    }
}
