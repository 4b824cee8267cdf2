//! Federation provider configuration.
//!
//! Configuration types for user federation providers: the per-instance
//! component configuration and the property schema a provider factory
//! publishes for it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FederationError, FederationResult};

// ============================================================================
// Component Configuration
// ============================================================================

/// Configuration of one federation provider instance.
///
/// Provider-specific settings are multivalued: single-valued properties
/// are read with [`FederationConfig::get`], list properties with
/// [`FederationConfig::get_list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederationConfig {
    /// Unique identifier for this provider configuration.
    pub id: Uuid,

    /// Realm this provider belongs to.
    pub realm_id: Uuid,

    /// Provider type (e.g., "dummy").
    pub provider_type: String,

    /// Display name.
    pub name: String,

    /// Provider-specific configuration.
    #[serde(default)]
    pub config: HashMap<String, Vec<String>>,
}

impl FederationConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> FederationConfigBuilder {
        FederationConfigBuilder::new()
    }

    /// Gets the first value of a config key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Gets every value of a config key.
    ///
    /// Each stored value may itself be a comma separated list; entries are
    /// split, trimmed, and blanks dropped. Returns `None` when the key is
    /// absent.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.config.get(key).map(|values| {
            values
                .iter()
                .flat_map(|v| v.split(','))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect()
        })
    }
}

/// Builder for [`FederationConfig`].
#[derive(Debug)]
pub struct FederationConfigBuilder {
    id: Option<Uuid>,
    realm_id: Option<Uuid>,
    provider_type: Option<String>,
    name: Option<String>,
    config: HashMap<String, Vec<String>>,
}

impl Default for FederationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FederationConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            realm_id: None,
            provider_type: None,
            name: None,
            config: HashMap::new(),
        }
    }

    /// Sets the ID.
    #[must_use]
    pub const fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the realm ID.
    #[must_use]
    pub const fn realm_id(mut self, realm_id: Uuid) -> Self {
        self.realm_id = Some(realm_id);
        self
    }

    /// Sets the provider type.
    #[must_use]
    pub fn provider_type(mut self, provider_type: impl Into<String>) -> Self {
        self.provider_type = Some(provider_type.into());
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a single-valued config entry, replacing previous values.
    #[must_use]
    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), vec![value.into()]);
        self
    }

    /// Sets a multivalued config entry, replacing previous values.
    #[must_use]
    pub fn config_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the configuration.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::Configuration` if the realm, provider type
    /// or name is missing.
    pub fn build(self) -> FederationResult<FederationConfig> {
        let realm_id = self
            .realm_id
            .ok_or_else(|| FederationError::config("realm_id is required"))?;
        let provider_type = self
            .provider_type
            .filter(|t| !t.is_empty())
            .ok_or_else(|| FederationError::config("provider_type is required"))?;
        let name = self
            .name
            .ok_or_else(|| FederationError::config("name is required"))?;

        Ok(FederationConfig {
            id: self.id.unwrap_or_else(Uuid::now_v7),
            realm_id,
            provider_type,
            name,
            config: self.config,
        })
    }
}

// ============================================================================
// Configuration Schema
// ============================================================================

/// Type of a configuration property, as shown by an admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPropertyType {
    /// Single string value.
    String,
    /// List of string values.
    MultivaluedString,
}

/// Description of one configuration property a provider accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfigProperty {
    /// Config key.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Longer explanation of the property.
    pub help_text: String,
    /// Value type.
    pub property_type: ConfigPropertyType,
    /// Value used when the property is not configured.
    pub default_value: Option<String>,
}

impl ProviderConfigProperty {
    /// Creates a property with the given key and type.
    #[must_use]
    pub fn new(name: impl Into<String>, property_type: ConfigPropertyType) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            help_text: String::new(),
            property_type,
            default_value: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}
