//! User storage provider traits.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - IA-2: Identification and Authentication (Organizational Users)
//! - IA-5: Authenticator Management
//!
//! A federation provider exposes two orthogonal capabilities: resolving
//! users ([`UserLookupProvider`]) and validating credentials
//! ([`CredentialInputValidator`]). One provider type may implement both.

use std::sync::Arc;

use kc_model::{CredentialInput, User};
use kc_storage::{RoleProvider, UserProvider};
use uuid::Uuid;

use crate::config::{FederationConfig, ProviderConfigProperty};
use crate::error::FederationResult;

// ============================================================================
// Local Storage Handle
// ============================================================================

/// Handles to the host's local storage that providers write through.
#[derive(Clone)]
pub struct LocalStorage {
    /// Local user store.
    pub users: Arc<dyn UserProvider>,
    /// Realm role store.
    pub roles: Arc<dyn RoleProvider>,
}

impl LocalStorage {
    /// Bundles the local stores.
    #[must_use]
    pub fn new(users: Arc<dyn UserProvider>, roles: Arc<dyn RoleProvider>) -> Self {
        Self { users, roles }
    }
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage").finish_non_exhaustive()
    }
}

// ============================================================================
// User Storage Provider
// ============================================================================

/// Base trait for user storage federation providers.
///
/// ## Implementation Notes
///
/// - Providers should be thread-safe (Send + Sync)
/// - Operations are async so they can await the local store
#[allow(async_fn_in_trait)]
pub trait UserStorageProvider: Send + Sync {
    /// Returns the provider configuration.
    fn config(&self) -> &FederationConfig;

    /// Returns the provider type identifier.
    fn provider_type(&self) -> &'static str;

    /// Validates the provider configuration.
    async fn validate_config(&self) -> FederationResult<()>;

    /// Closes the provider, releasing any resources.
    async fn close(&self) -> FederationResult<()> {
        Ok(())
    }
}

// ============================================================================
// User Lookup
// ============================================================================

/// Resolves users on behalf of the host.
#[allow(async_fn_in_trait)]
pub trait UserLookupProvider: UserStorageProvider {
    /// Gets a user by its composite id (see [`crate::StorageId`]).
    async fn get_user_by_id(&self, realm_id: Uuid, id: &str) -> FederationResult<Option<User>>;

    /// Gets a user by username.
    async fn get_user_by_username(
        &self,
        realm_id: Uuid,
        username: &str,
    ) -> FederationResult<Option<User>>;

    /// Gets a user by email.
    async fn get_user_by_email(
        &self,
        realm_id: Uuid,
        email: &str,
    ) -> FederationResult<Option<User>>;
}

// ============================================================================
// Credential Validation
// ============================================================================

/// Validates credentials presented for a user.
///
/// ## NIST 800-53 Rev5: IA-5
///
/// Implementations must not log or store presented secrets.
#[allow(async_fn_in_trait)]
pub trait CredentialInputValidator: UserStorageProvider {
    /// Checks whether the provider can validate this credential type.
    fn supports_credential_type(&self, credential_type: &str) -> bool;

    /// Checks whether the user has a credential of this type configured.
    fn is_configured_for(&self, realm_id: Uuid, user: &User, credential_type: &str) -> bool;

    /// Validates a presented credential.
    ///
    /// An unacceptable credential is `Ok(false)`. Validation may update
    /// `user` (and the local store) as a side effect.
    ///
    /// ## Errors
    ///
    /// Returns an error only if the local store fails.
    async fn is_valid(
        &self,
        realm_id: Uuid,
        user: &mut User,
        input: &dyn CredentialInput,
    ) -> FederationResult<bool>;
}

// ============================================================================
// Provider Factory
// ============================================================================

/// Creates configured provider instances.
///
/// The factory owns the provider's configuration schema, which is built
/// once when the factory is constructed.
pub trait UserStorageProviderFactory: Send + Sync {
    /// Provider type produced by this factory.
    type Provider: UserStorageProvider;

    /// Returns the unique identifier for this factory.
    fn id(&self) -> &'static str;

    /// Returns help text shown next to the provider in an admin console.
    fn help_text(&self) -> &'static str;

    /// Returns the configuration properties the provider accepts.
    fn config_properties(&self) -> &[ProviderConfigProperty];

    /// Validates a provider configuration before it is saved.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::Configuration` if the configuration is
    /// unusable.
    fn validate_configuration(&self, config: &FederationConfig) -> FederationResult<()>;

    /// Creates a provider instance bound to the local stores.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration cannot be turned into a
    /// working provider.
    fn create(
        &self,
        storage: LocalStorage,
        config: FederationConfig,
    ) -> FederationResult<Self::Provider>;
}
