//! One-time migration of legacy password strings.
//!
//! A user starts out unmigrated. The first password that structurally
//! matches the configured pattern is turned into facts (a role name and
//! attribute values), those facts are written to the user, and the user is
//! marked as migrated. Migrated users are never parsed again.

use kc_federation::error::FederationResult;
use kc_federation::provider::LocalStorage;
use kc_model::user::required_actions;
use kc_model::User;
use uuid::Uuid;

use crate::config::{MigrationConfig, ROLE_NAME_GROUP};

/// User attribute recording that migration has happened.
pub const MIGRATED_ATTRIBUTE: &str = "migrated";

/// Migration state of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    /// The password has not been parsed yet.
    Unmigrated,
    /// The password was parsed; further checks short-circuit.
    Migrated,
}

impl MigrationState {
    /// Reads the state from the user's `migrated` attribute.
    ///
    /// Only the exact value `"true"` counts as migrated.
    #[must_use]
    pub fn of(user: &User) -> Self {
        match user.get_first_attribute(MIGRATED_ATTRIBUTE) {
            Some("true") => Self::Migrated,
            _ => Self::Unmigrated,
        }
    }

    /// Checks whether the user is migrated.
    #[must_use]
    pub const fn is_migrated(self) -> bool {
        matches!(self, Self::Migrated)
    }
}

/// Facts extracted from a structurally matching password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationFacts {
    /// Value of the `roleName` group, if it took part in the match.
    pub role_name: Option<String>,
    /// Configured attribute groups that took part in the match, in
    /// configuration order.
    pub attributes: Vec<(String, String)>,
}

/// Parses legacy passwords and applies the extracted facts.
#[derive(Debug, Clone)]
pub struct PasswordMigrator {
    config: MigrationConfig,
}

impl PasswordMigrator {
    /// Creates a migrator for the given settings.
    #[must_use]
    pub const fn new(config: MigrationConfig) -> Self {
        Self { config }
    }

    /// Returns the migration settings.
    #[must_use]
    pub const fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Matches a password against the pattern.
    ///
    /// The pattern may match anywhere in the value. Returns `None` when
    /// there is no match or the pattern has no capture groups at all.
    #[must_use]
    pub fn parse(&self, value: &str) -> Option<MigrationFacts> {
        let pattern = self.config.pattern();
        if pattern.captures_len() <= 1 {
            return None;
        }

        let captures = pattern.captures(value)?;
        let role_name = captures
            .name(ROLE_NAME_GROUP)
            .map(|m| m.as_str().to_string());
        let attributes = self
            .config
            .attribute_names()
            .iter()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();

        Some(MigrationFacts {
            role_name,
            attributes,
        })
    }

    /// Writes migration facts to the user and the local store.
    ///
    /// The user is marked as migrated regardless of whether any role or
    /// attribute could be applied. A role name unknown to the realm is
    /// skipped. `user` is only changed once the store has accepted the
    /// update; on error it is left as it was.
    ///
    /// ## Errors
    ///
    /// Returns an error if the local store fails.
    pub async fn apply(
        &self,
        storage: &LocalStorage,
        realm_id: Uuid,
        user: &mut User,
        facts: MigrationFacts,
    ) -> FederationResult<()> {
        let mut migrated = user.clone();
        migrated.set_single_attribute(MIGRATED_ATTRIBUTE, "true");

        if let Some(role_name) = facts.role_name {
            match storage.roles.get_realm_role_by_name(realm_id, &role_name).await? {
                Some(role) => {
                    storage.users.grant_role(realm_id, migrated.id, role.id).await?;
                    tracing::info!(
                        user_id = %migrated.id,
                        role = %role.name,
                        "Granted migrated role"
                    );
                }
                None => {
                    tracing::debug!(
                        user_id = %migrated.id,
                        role = %role_name,
                        "Role not found in realm, skipping"
                    );
                }
            }
        }

        for (name, value) in facts.attributes {
            tracing::info!(
                user_id = %migrated.id,
                attribute = %name,
                "Set migrated attribute"
            );
            migrated.set_single_attribute(name, value);
        }

        migrated.add_required_action(required_actions::UPDATE_PASSWORD);
        migrated.touch();
        storage.users.update(&migrated).await?;

        *user = migrated;
        Ok(())
    }
}
