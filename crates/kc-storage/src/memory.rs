//! In-memory storage backends.
//!
//! These providers keep everything in process memory and are meant for
//! development and testing. For production use a persistent backend.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use kc_model::{Role, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::role::RoleProvider;
use crate::user::UserProvider;

// ============================================================================
// In-Memory User Provider
// ============================================================================

/// In-memory user provider.
///
/// Usernames are unique per realm, matching the constraint a relational
/// backend enforces.
pub struct InMemoryUserProvider {
    users: RwLock<HashMap<(Uuid, Uuid), User>>,
    role_grants: RwLock<HashMap<(Uuid, Uuid), HashSet<Uuid>>>,
}

impl InMemoryUserProvider {
    /// Creates an empty user provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            role_grants: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of users stored for a realm.
    pub async fn count(&self, realm_id: Uuid) -> usize {
        self.users
            .read()
            .await
            .keys()
            .filter(|(realm, _)| *realm == realm_id)
            .count()
    }

    async fn ensure_exists(&self, realm_id: Uuid, user_id: Uuid) -> StorageResult<()> {
        if self.users.read().await.contains_key(&(realm_id, user_id)) {
            Ok(())
        } else {
            Err(StorageError::not_found("User", user_id))
        }
    }
}

impl Default for InMemoryUserProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserProvider for InMemoryUserProvider {
    async fn create(&self, user: &User) -> StorageResult<()> {
        if user.username.trim().is_empty() {
            return Err(StorageError::invalid("username cannot be empty"));
        }

        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|u| u.realm_id == user.realm_id && u.username == user.username);
        if taken {
            return Err(StorageError::duplicate("User", "username", &user.username));
        }

        users.insert((user.realm_id, user.id), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&(user.realm_id, user.id)) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(StorageError::not_found("User", user.id)),
        }
    }

    async fn delete(&self, realm_id: Uuid, id: Uuid) -> StorageResult<()> {
        if self.users.write().await.remove(&(realm_id, id)).is_none() {
            return Err(StorageError::not_found("User", id));
        }
        self.role_grants.write().await.remove(&(realm_id, id));
        Ok(())
    }

    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<User>> {
        Ok(self.users.read().await.get(&(realm_id, id)).cloned())
    }

    async fn get_by_username(&self, realm_id: Uuid, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.realm_id == realm_id && u.username == username)
            .cloned())
    }

    async fn get_by_email(&self, realm_id: Uuid, email: &str) -> StorageResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.realm_id == realm_id && u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn grant_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()> {
        self.ensure_exists(realm_id, user_id).await?;
        self.role_grants
            .write()
            .await
            .entry((realm_id, user_id))
            .or_default()
            .insert(role_id);
        Ok(())
    }

    async fn revoke_role(&self, realm_id: Uuid, user_id: Uuid, role_id: Uuid) -> StorageResult<()> {
        self.ensure_exists(realm_id, user_id).await?;
        if let Some(grants) = self.role_grants.write().await.get_mut(&(realm_id, user_id)) {
            grants.remove(&role_id);
        }
        Ok(())
    }

    async fn get_roles(&self, realm_id: Uuid, user_id: Uuid) -> StorageResult<Vec<Uuid>> {
        Ok(self
            .role_grants
            .read()
            .await
            .get(&(realm_id, user_id))
            .map(|grants| grants.iter().copied().collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// In-Memory Role Provider
// ============================================================================

/// In-memory realm role provider.
pub struct InMemoryRoleProvider {
    roles: RwLock<HashMap<(Uuid, Uuid), Role>>,
}

impl InMemoryRoleProvider {
    /// Creates an empty role provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoleProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoleProvider for InMemoryRoleProvider {
    async fn create(&self, role: &Role) -> StorageResult<()> {
        let mut roles = self.roles.write().await;
        let taken = roles
            .values()
            .any(|r| r.realm_id == role.realm_id && r.name == role.name);
        if taken {
            return Err(StorageError::duplicate("Role", "name", &role.name));
        }

        roles.insert((role.realm_id, role.id), role.clone());
        Ok(())
    }

    async fn delete(&self, realm_id: Uuid, id: Uuid) -> StorageResult<()> {
        match self.roles.write().await.remove(&(realm_id, id)) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found("Role", id)),
        }
    }

    async fn get_by_id(&self, realm_id: Uuid, id: Uuid) -> StorageResult<Option<Role>> {
        Ok(self.roles.read().await.get(&(realm_id, id)).cloned())
    }

    async fn get_realm_role_by_name(
        &self,
        realm_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .values()
            .find(|r| r.realm_id == realm_id && r.name == name)
            .cloned())
    }

}
