//! # kc-federation
//!
//! User federation framework for Keycloak Rust.
//!
//! This crate provides the traits that user federation providers implement:
//!
//! - [`UserStorageProvider`] - provider lifecycle and configuration
//! - [`UserLookupProvider`] - resolving users by id, username or email
//! - [`CredentialInputValidator`] - validating presented credentials
//! - [`UserStorageProviderFactory`] - configuration schema, validation and
//!   provider construction

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod provider;
pub mod storage_id;

pub use config::{ConfigPropertyType, FederationConfig, ProviderConfigProperty};
pub use error::{FederationError, FederationResult};
pub use provider::{
    CredentialInputValidator, LocalStorage, UserLookupProvider, UserStorageProvider,
    UserStorageProviderFactory,
};
pub use storage_id::StorageId;
