//! Dummy storage provider implementation.
//!
//! ## Security
//!
//! This provider accepts any password once a user has been migrated and
//! creates a local user for every username it is asked about. It must only
//! be used for testing and local development. Presented passwords are
//! never logged.

use kc_federation::config::FederationConfig;
use kc_federation::error::{FederationError, FederationResult};
use kc_federation::provider::{
    CredentialInputValidator, LocalStorage, UserLookupProvider, UserStorageProvider,
};
use kc_federation::storage_id::StorageId;
use kc_model::{credential_types, CredentialInput, User};
use uuid::Uuid;

use crate::config::MigrationConfig;
use crate::migrator::{MigrationState, PasswordMigrator};

/// Provider type identifier.
pub const PROVIDER_TYPE: &str = "dummy";

/// First name given to materialized users.
pub const PLACEHOLDER_FIRST_NAME: &str = "Dummy";

/// Last name given to materialized users.
pub const PLACEHOLDER_LAST_NAME: &str = "Migration";

/// Dummy user storage provider.
///
/// Resolves every username to a freshly created local user and migrates
/// legacy passwords on first use.
#[derive(Debug)]
pub struct DummyStorageProvider {
    /// Federation configuration.
    config: FederationConfig,

    /// Local stores written through.
    storage: LocalStorage,

    /// Password parser.
    migrator: PasswordMigrator,
}

impl DummyStorageProvider {
    /// Creates a new dummy provider.
    #[must_use]
    pub const fn new(
        config: FederationConfig,
        storage: LocalStorage,
        migration: MigrationConfig,
    ) -> Self {
        Self {
            config,
            storage,
            migrator: PasswordMigrator::new(migration),
        }
    }

    /// Returns the password migrator.
    #[must_use]
    pub const fn migrator(&self) -> &PasswordMigrator {
        &self.migrator
    }

    /// Returns the federation link stamped on created users.
    #[must_use]
    pub fn federation_link(&self) -> String {
        self.config.id.to_string()
    }

    /// Creates the local user backing `username`.
    ///
    /// No existence check is made; a store that enforces unique usernames
    /// rejects repeated creation.
    async fn create_adapter(&self, realm_id: Uuid, username: &str) -> FederationResult<User> {
        tracing::info!(username = %username, "Creating user adapter");

        let mut user = User::new(realm_id, username)
            .with_federation_link(self.federation_link())
            .with_email(username)
            .with_first_name(PLACEHOLDER_FIRST_NAME)
            .with_last_name(PLACEHOLDER_LAST_NAME);
        user.enabled = true;
        user.email_verified = true;

        self.storage
            .users
            .create(&user)
            .await
            .map_err(|e| FederationError::user_creation(username, e))?;

        Ok(user)
    }
}

impl UserStorageProvider for DummyStorageProvider {
    fn config(&self) -> &FederationConfig {
        &self.config
    }

    fn provider_type(&self) -> &'static str {
        PROVIDER_TYPE
    }

    async fn validate_config(&self) -> FederationResult<()> {
        MigrationConfig::validate(&self.config)
    }
}

impl UserLookupProvider for DummyStorageProvider {
    async fn get_user_by_id(&self, realm_id: Uuid, id: &str) -> FederationResult<Option<User>> {
        let storage_id = StorageId::parse(id);
        tracing::debug!(
            provider_id = ?storage_id.provider_id(),
            external_id = %storage_id.external_id(),
            "Resolving user by id"
        );
        self.get_user_by_username(realm_id, storage_id.external_id())
            .await
    }

    async fn get_user_by_username(
        &self,
        realm_id: Uuid,
        username: &str,
    ) -> FederationResult<Option<User>> {
        self.create_adapter(realm_id, username).await.map(Some)
    }

    async fn get_user_by_email(
        &self,
        _realm_id: Uuid,
        _email: &str,
    ) -> FederationResult<Option<User>> {
        Ok(None)
    }
}

impl CredentialInputValidator for DummyStorageProvider {
    fn supports_credential_type(&self, credential_type: &str) -> bool {
        credential_type == credential_types::PASSWORD
    }

    fn is_configured_for(&self, _realm_id: Uuid, _user: &User, credential_type: &str) -> bool {
        credential_type == credential_types::PASSWORD
    }

    async fn is_valid(
        &self,
        realm_id: Uuid,
        user: &mut User,
        input: &dyn CredentialInput,
    ) -> FederationResult<bool> {
        if !self.supports_credential_type(input.credential_type()) {
            return Ok(false);
        }
        let Some(value) = input.value() else {
            return Ok(false);
        };

        if MigrationState::of(user).is_migrated() {
            return Ok(true);
        }

        match self.migrator.parse(value) {
            Some(facts) => {
                self.migrator
                    .apply(&self.storage, realm_id, user, facts)
                    .await?;
                Ok(true)
            }
            None => {
                tracing::warn!(user_id = %user.id, "Not possible to process password for user");
                Ok(false)
            }
        }
    }
}
