//! # kc-federation-dummy
//!
//! Dummy user federation provider for migrating legacy users.
//!
//! The provider materializes a local user for every username it is asked
//! about and, on the user's first password check, parses the presented
//! password with a configured regular expression. Named groups in the
//! match become a realm role grant and user attributes; afterwards the
//! user is marked as migrated and every later password check succeeds.
//!
//! This provider is intended for testing and local development only.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod factory;
pub mod migrator;
pub mod provider;

pub use config::MigrationConfig;
pub use factory::DummyStorageProviderFactory;
pub use migrator::{MigrationFacts, MigrationState, PasswordMigrator};
pub use provider::DummyStorageProvider;
