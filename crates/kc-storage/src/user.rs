//! User storage provider trait.

use async_trait::async_trait;
use kc_model::User;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for user storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Creates a new user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a user with the same username exists.
    async fn create(&self, user: &User) -> StorageResult<()>;

    /// Updates an existing user.
    ///
    /// Replaces profile fields, attributes, required actions and the
    /// federation link with the values carried by `user`.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn update(&self, user: &User) -> StorageResult<()>;

    /// Deletes a user by ID.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn delete(&self, realm_id: Uuid, id: Uuid) -> StorageResult<()>;

    /// Gets a user by ID.
    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<User>>;

    /// Gets a user by username.
    async fn get_by_username(&self, realm_id: Uuid, username: &str) -> StorageResult<Option<User>>;

    /// Gets a user by email.
    async fn get_by_email(&self, realm_id: Uuid, email: &str) -> StorageResult<Option<User>>;

    /// Grants a role to a user.
    ///
    /// Granting a role the user already holds succeeds without change.
    async fn grant_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()>;

    /// Revokes a role from a user.
    async fn revoke_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()>;

    /// Gets the roles granted to a user.
    async fn get_roles(&self, realm_id: Uuid, user_id: Uuid) -> StorageResult<Vec<Uuid>>;

    /// Checks if a user has a specific role.
    async fn has_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<bool> {
        Ok(self.get_roles(realm_id, user_id).await?.contains(&role_id))
    }
}
