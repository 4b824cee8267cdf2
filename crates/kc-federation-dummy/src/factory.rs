//! Factory for the dummy storage provider.

use kc_federation::config::{FederationConfig, ProviderConfigProperty};
use kc_federation::error::FederationResult;
use kc_federation::provider::{LocalStorage, UserStorageProviderFactory};

use crate::config::{config_properties, MigrationConfig};
use crate::provider::DummyStorageProvider;

/// Factory identifier.
pub const PROVIDER_ID: &str = "Dummy User Federation SPI";

/// Help text shown next to the provider.
pub const HELP_TEXT: &str =
    "Used to provide dummy user federation. it is used for testing only. Please do not use this in production";

/// Creates [`DummyStorageProvider`] instances.
#[derive(Debug, Clone)]
pub struct DummyStorageProviderFactory {
    properties: Vec<ProviderConfigProperty>,
}

impl DummyStorageProviderFactory {
    /// Creates the factory and its configuration schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: config_properties(),
        }
    }
}

impl Default for DummyStorageProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStorageProviderFactory for DummyStorageProviderFactory {
    type Provider = DummyStorageProvider;

    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    fn config_properties(&self) -> &[ProviderConfigProperty] {
        &self.properties
    }

    fn validate_configuration(&self, config: &FederationConfig) -> FederationResult<()> {
        let result = MigrationConfig::validate(config);
        tracing::debug!(
            provider = %config.name,
            valid = result.is_ok(),
            "Validated dummy provider configuration"
        );
        result
    }

    fn create(
        &self,
        storage: LocalStorage,
        config: FederationConfig,
    ) -> FederationResult<Self::Provider> {
        let migration = MigrationConfig::from_federation_config(&config)?;
        tracing::debug!(
            provider = %config.name,
            pattern = %migration.source(),
            "Creating dummy provider"
        );
        Ok(DummyStorageProvider::new(config, storage, migration))
    }
}
